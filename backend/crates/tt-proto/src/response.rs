use crate::{MAX_FRAME_LEN, ResponseCode, Result as ProtoResult, decode_json, encode_json};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Envelope keys, brackets and the frame terminator around `storedTweets`.
const TIMELINE_OVERHEAD: usize = 64;

/// Bytes one timeline frame can spend on `storedTweets` entries.
pub const TIMELINE_BUDGET: usize = MAX_FRAME_LEN - TIMELINE_OVERHEAD;

/// Response record as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub response_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_message: Option<String>,
    /// Only set on `VALIDATE_USER` responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_user_idx: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_tweets: Option<Vec<String>>,
}

impl ResponseEnvelope {
    /// Plain status response.
    pub fn status<S: Into<String>>(code: ResponseCode, message: S) -> Self {
        Self {
            response_code: code.as_i32(),
            detailed_message: Some(message.into()),
            is_valid: None,
            client_user_idx: None,
            stored_tweets: None,
        }
    }

    /// Generic rejection for unknown or malformed requests.
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::status(ResponseCode::Invalid, message)
    }

    pub fn user_accepted<S: Into<String>>(slot_index: usize, message: S) -> Self {
        Self {
            is_valid: Some(true),
            client_user_idx: i64::try_from(slot_index).ok(),
            ..Self::status(ResponseCode::ValidateUser, message)
        }
    }

    pub fn user_rejected<S: Into<String>>(message: S) -> Self {
        Self {
            is_valid: Some(false),
            ..Self::status(ResponseCode::ValidateUser, message)
        }
    }

    pub fn timeline(stored_tweets: Vec<String>) -> Self {
        Self {
            response_code: ResponseCode::Timeline.as_i32(),
            detailed_message: None,
            is_valid: None,
            client_user_idx: None,
            stored_tweets: Some(stored_tweets),
        }
    }

    /// Encoded size of `entry` inside `storedTweets`, separator included.
    pub fn stored_tweet_len(entry: &str) -> usize {
        serde_json::to_string(entry).map_or(usize::MAX, |json| json.len() + 1)
    }

    pub fn code(&self) -> Option<ResponseCode> {
        ResponseCode::try_from(self.response_code).ok()
    }

    pub fn message(&self) -> &str {
        self.detailed_message.as_deref().unwrap_or_default()
    }

    #[track_caller]
    pub fn decode(payload: &[u8]) -> ProtoResult<Self> {
        decode_json(payload)
    }

    #[track_caller]
    pub fn encode(&self) -> ProtoResult<Bytes> {
        encode_json(self)
    }
}
