pub mod subscription_set;
pub mod tweet;
