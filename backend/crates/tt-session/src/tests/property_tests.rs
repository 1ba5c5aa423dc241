use crate::UserRegistry;
use crate::tests::limits;

use proptest::prelude::*;

proptest! {
    #[test]
    fn given_distinct_names_within_capacity_when_validated_then_slots_distinct(
        names in prop::collection::hash_set("[a-z]{1,12}", 1..6)
    ) {
        let registry = UserRegistry::new(limits(5));
        let leases: Vec<_> = names
            .iter()
            .map(|name| registry.validate_username(name).unwrap())
            .collect();

        let mut slots: Vec<usize> = leases.iter().map(|l| l.slot().index()).collect();
        slots.sort_unstable();
        slots.dedup();
        prop_assert_eq!(slots.len(), names.len());
        prop_assert_eq!(registry.occupied_count(), names.len());
    }

    #[test]
    fn given_held_name_when_validated_repeatedly_then_always_rejected(
        name in "[a-z]{1,12}",
        attempts in 1usize..5
    ) {
        let registry = UserRegistry::new(limits(5));
        let _lease = registry.validate_username(&name).unwrap();

        for _ in 0..attempts {
            prop_assert!(registry.validate_username(&name).is_err());
        }
        prop_assert_eq!(registry.occupied_count(), 1);
    }

    #[test]
    fn given_any_subscriptions_when_applied_then_bound_respected(
        picks in prop::collection::vec("[a-e]", 0..12)
    ) {
        let registry = UserRegistry::new(limits(1));
        let lease = registry.validate_username("alice").unwrap();
        let validator = registry.hashtag_validator();

        for pick in &picks {
            let tag = validator.validate_subscription(&format!("#{pick}")).unwrap();
            let _ = registry.subscribe(lease.slot(), tag);
        }

        let subs = registry.subscriptions(lease.slot());
        prop_assert!(subs.len() <= registry.limits().max_subscriptions);
        let mut names: Vec<&str> = subs.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), subs.len());
    }
}
