//! Wire protocol shared by the ttweet server and client.
//!
//! Every frame is a 32-byte header holding the payload size in ASCII
//! decimal (NUL padded), followed by a JSON payload terminated by a NUL
//! byte. The size counts that terminator.

pub mod codec;
pub mod codes;
pub mod error;
pub mod request;
pub mod response;

pub use codec::{FrameCodec, HEADER_LEN, MAX_FRAME_LEN, decode_json, encode_json};
pub use codes::{RequestCode, ResponseCode};
pub use error::{ProtoError, Result};
pub use request::{Request, RequestEnvelope};
pub use response::{ResponseEnvelope, TIMELINE_BUDGET};

#[cfg(test)]
mod tests;
