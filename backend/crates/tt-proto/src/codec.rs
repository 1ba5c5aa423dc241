use crate::{ProtoError, Result as ProtoResult};

use std::panic::Location;

use bytes::{BufMut, Bytes, BytesMut};
use error_location::ErrorLocation;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::codec::{Decoder, Encoder};

/// Width of the ASCII size header.
pub const HEADER_LEN: usize = 32;

/// Largest payload accepted or produced, terminator included.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

const TERMINATOR: u8 = 0;

/// Splits a byte stream into payloads and frames outgoing ones.
///
/// Decoded payloads have their trailing NUL removed if present.
#[derive(Debug, Clone, Copy)]
pub struct FrameCodec {
    max_frame_len: usize,
}

impl FrameCodec {
    pub fn new() -> Self {
        Self {
            max_frame_len: MAX_FRAME_LEN,
        }
    }

    pub fn with_max_frame_len(max_frame_len: usize) -> Self {
        Self { max_frame_len }
    }

    #[track_caller]
    fn parse_header(header: &[u8]) -> ProtoResult<usize> {
        let digits_end = header
            .iter()
            .position(|b| *b == TERMINATOR)
            .unwrap_or(header.len());
        let digits = &header[..digits_end];

        std::str::from_utf8(digits)
            .ok()
            .map(str::trim)
            .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| ProtoError::InvalidHeader {
                header: String::from_utf8_lossy(digits).into_owned(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = Bytes;
    type Error = ProtoError;

    fn decode(&mut self, src: &mut BytesMut) -> ProtoResult<Option<Self::Item>> {
        if src.len() < HEADER_LEN {
            return Ok(None);
        }

        let size = Self::parse_header(&src[..HEADER_LEN])?;

        if size > self.max_frame_len {
            return Err(ProtoError::FrameTooLarge {
                size,
                max: self.max_frame_len,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let total_len = HEADER_LEN + size;
        if src.len() < total_len {
            src.reserve(total_len - src.len());
            return Ok(None);
        }

        let mut frame = src.split_to(total_len);
        let mut payload = frame.split_off(HEADER_LEN);
        if payload.last() == Some(&TERMINATOR) {
            payload.truncate(payload.len() - 1);
        }

        debug!("FrameCodec: decoded {} byte payload", payload.len());
        Ok(Some(payload.freeze()))
    }
}

impl Encoder<Bytes> for FrameCodec {
    type Error = ProtoError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> ProtoResult<()> {
        let size = item.len() + 1;
        if size > self.max_frame_len {
            return Err(ProtoError::FrameTooLarge {
                size,
                max: self.max_frame_len,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut header = [TERMINATOR; HEADER_LEN];
        let digits = size.to_string();
        header[..digits.len()].copy_from_slice(digits.as_bytes());

        dst.reserve(HEADER_LEN + size);
        dst.extend_from_slice(&header);
        dst.extend_from_slice(&item);
        dst.put_u8(TERMINATOR);
        Ok(())
    }
}

/// Serialize a record into a payload ready for [`FrameCodec`].
#[track_caller]
pub fn encode_json<T: Serialize>(value: &T) -> ProtoResult<Bytes> {
    let payload = serde_json::to_vec(value)?;
    Ok(Bytes::from(payload))
}

/// Parse a decoded payload.
#[track_caller]
pub fn decode_json<T: DeserializeOwned>(payload: &[u8]) -> ProtoResult<T> {
    let value = serde_json::from_slice(payload)?;
    Ok(value)
}
