use crate::{ProtoError, Request, RequestEnvelope};

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_validate_payload_when_decoded_then_username_extracted() {
    let request = Request::decode(br#"{"requestCode":6,"username":"alice"}"#).unwrap();
    assert_eq!(
        request,
        Request::ValidateUser {
            username: "alice".to_string()
        }
    );
}

#[test]
fn given_tweet_payload_when_decoded_then_body_and_tags_extracted() {
    // Given
    let payload = br#"{"requestCode":1,"username":"bob","clientUserIdx":1,
        "ttweetString":"hello","numValidHashtags":2,"ttweetHashtags":["news","sports"]}"#;

    // When
    let request = Request::decode(payload).unwrap();

    // Then
    assert_eq!(
        request,
        Request::Tweet {
            body: "hello".to_string(),
            hashtags: vec!["news".to_string(), "sports".to_string()],
        }
    );
}

#[test]
fn given_tweet_without_hashtags_when_decoded_then_missing_field() {
    let result = Request::decode(br#"{"requestCode":1,"ttweetString":"hello"}"#);
    assert!(matches!(
        result,
        Err(ProtoError::MissingField {
            field: "ttweetHashtags",
            code: 1,
            ..
        })
    ));
}

#[test]
fn given_subscribe_without_hashtag_when_decoded_then_missing_field() {
    let result = Request::decode(br#"{"requestCode":2}"#);
    assert!(matches!(
        result,
        Err(ProtoError::MissingField {
            field: "subscriptionHashtag",
            ..
        })
    ));
}

#[test]
fn given_no_request_code_when_decoded_then_missing_field() {
    let result = Request::decode(br#"{"username":"alice"}"#);
    assert!(matches!(
        result,
        Err(ProtoError::MissingField {
            field: "requestCode",
            ..
        })
    ));
}

#[test]
fn given_unknown_code_when_decoded_then_unknown_request() {
    let request = Request::decode(br#"{"requestCode":42}"#).unwrap();
    assert_eq!(request, Request::Unknown { code: 42 });
}

#[test]
fn given_invalid_code_when_decoded_then_unknown_request() {
    let request = Request::decode(br#"{"requestCode":0}"#).unwrap();
    assert_that!(request.name(), eq("Unknown"));
}

#[test]
fn given_wrong_field_type_when_decoded_then_json_error() {
    let result = Request::decode(br#"{"requestCode":6,"username":5}"#);
    assert!(matches!(result, Err(ProtoError::Json { .. })));
}

#[test]
fn given_tweet_when_enveloped_then_camel_case_fields() {
    // Given
    let request = Request::Tweet {
        body: "hello".to_string(),
        hashtags: vec!["news".to_string()],
    };

    // When
    let json = serde_json::to_value(request.to_envelope("bob", Some(2))).unwrap();

    // Then
    assert_that!(json["requestCode"].as_i64(), eq(Some(1)));
    assert_that!(json["username"].as_str(), eq(Some("bob")));
    assert_that!(json["clientUserIdx"].as_i64(), eq(Some(2)));
    assert_that!(json["ttweetString"].as_str(), eq(Some("hello")));
    assert_that!(json["numValidHashtags"].as_u64(), eq(Some(1)));
    assert!(json.get("subscriptionHashtag").is_none());
}

#[test]
fn given_encoded_request_when_decoded_then_same_request() {
    let request = Request::Subscribe {
        hashtag: "news".to_string(),
    };
    let payload = request.encode("alice", None).unwrap();
    assert_eq!(Request::decode(&payload).unwrap(), request);
}

#[test]
fn given_empty_envelope_when_default_then_all_fields_absent() {
    let json = serde_json::to_string(&RequestEnvelope::default()).unwrap();
    assert_that!(json.as_str(), eq("{}"));
}
