use crate::{ProtoError, RequestCode, Result as ProtoResult, decode_json, encode_json};

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Request record exactly as it travels on the wire.
///
/// Every field is optional here; [`Request::from_envelope`] decides which
/// ones a given request kind needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Slot index the client was given. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_user_idx: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttweet_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_valid_hashtags: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttweet_hashtags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_hashtag: Option<String>,
}

/// A decoded request with every field its kind depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ValidateUser { username: String },
    Tweet { body: String, hashtags: Vec<String> },
    Subscribe { hashtag: String },
    Unsubscribe { hashtag: String },
    Timeline,
    Exit,
    /// `requestCode` 0 or a value no handler knows
    Unknown { code: i32 },
}

impl Request {
    /// Parse a frame payload.
    #[track_caller]
    pub fn decode(payload: &[u8]) -> ProtoResult<Self> {
        let envelope: RequestEnvelope = decode_json(payload)?;
        Self::from_envelope(envelope)
    }

    /// Check field presence for the envelope's request kind.
    #[track_caller]
    pub fn from_envelope(envelope: RequestEnvelope) -> ProtoResult<Self> {
        let Some(code) = envelope.request_code else {
            return Err(ProtoError::missing_field("requestCode", -1));
        };

        let request = match RequestCode::try_from(code) {
            Ok(RequestCode::ValidateUser) => Self::ValidateUser {
                username: envelope
                    .username
                    .ok_or_else(|| ProtoError::missing_field("username", code))?,
            },
            Ok(RequestCode::Tweet) => Self::Tweet {
                body: envelope
                    .ttweet_string
                    .ok_or_else(|| ProtoError::missing_field("ttweetString", code))?,
                hashtags: envelope
                    .ttweet_hashtags
                    .ok_or_else(|| ProtoError::missing_field("ttweetHashtags", code))?,
            },
            Ok(RequestCode::Subscribe) => Self::Subscribe {
                hashtag: envelope
                    .subscription_hashtag
                    .ok_or_else(|| ProtoError::missing_field("subscriptionHashtag", code))?,
            },
            Ok(RequestCode::Unsubscribe) => Self::Unsubscribe {
                hashtag: envelope
                    .subscription_hashtag
                    .ok_or_else(|| ProtoError::missing_field("subscriptionHashtag", code))?,
            },
            Ok(RequestCode::Timeline) => Self::Timeline,
            Ok(RequestCode::Exit) => Self::Exit,
            Ok(RequestCode::Invalid) | Err(_) => Self::Unknown { code },
        };

        Ok(request)
    }

    /// Build the wire record, stamping the sender's identity.
    pub fn to_envelope(&self, username: &str, client_user_idx: Option<i64>) -> RequestEnvelope {
        let mut envelope = RequestEnvelope {
            request_code: Some(self.code()),
            username: Some(String::from(username)),
            client_user_idx,
            ..RequestEnvelope::default()
        };

        match self {
            Self::ValidateUser { username } => {
                envelope.username = Some(username.clone());
            }
            Self::Tweet { body, hashtags } => {
                envelope.ttweet_string = Some(body.clone());
                envelope.num_valid_hashtags = Some(hashtags.len());
                envelope.ttweet_hashtags = Some(hashtags.clone());
            }
            Self::Subscribe { hashtag } | Self::Unsubscribe { hashtag } => {
                envelope.subscription_hashtag = Some(hashtag.clone());
            }
            Self::Timeline | Self::Exit | Self::Unknown { .. } => {}
        }

        envelope
    }

    /// Serialize into a frame payload.
    #[track_caller]
    pub fn encode(&self, username: &str, client_user_idx: Option<i64>) -> ProtoResult<Bytes> {
        encode_json(&self.to_envelope(username, client_user_idx))
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidateUser { .. } => RequestCode::ValidateUser.as_i32(),
            Self::Tweet { .. } => RequestCode::Tweet.as_i32(),
            Self::Subscribe { .. } => RequestCode::Subscribe.as_i32(),
            Self::Unsubscribe { .. } => RequestCode::Unsubscribe.as_i32(),
            Self::Timeline => RequestCode::Timeline.as_i32(),
            Self::Exit => RequestCode::Exit.as_i32(),
            Self::Unknown { code } => *code,
        }
    }

    /// Handler name used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValidateUser { .. } => "ValidateUser",
            Self::Tweet { .. } => "Tweet",
            Self::Subscribe { .. } => "Subscribe",
            Self::Unsubscribe { .. } => "Unsubscribe",
            Self::Timeline => "Timeline",
            Self::Exit => "Exit",
            Self::Unknown { .. } => "Unknown",
        }
    }
}
