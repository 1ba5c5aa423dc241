use crate::{FrameCodec, HEADER_LEN, ProtoError};

use bytes::{Bytes, BytesMut};
use futures::{SinkExt, StreamExt};
use googletest::assert_that;
use googletest::prelude::{anything, eq, err};
use tokio_util::codec::{Decoder, Encoder, Framed};

fn frame(payload: &[u8]) -> BytesMut {
    let mut header = [0u8; HEADER_LEN];
    let size = payload.len().to_string();
    header[..size.len()].copy_from_slice(size.as_bytes());

    let mut buf = BytesMut::new();
    buf.extend_from_slice(&header);
    buf.extend_from_slice(payload);
    buf
}

#[test]
fn given_payload_when_encoded_then_ascii_header_and_terminator() {
    // Given
    let mut codec = FrameCodec::new();
    let mut dst = BytesMut::new();

    // When
    codec
        .encode(Bytes::from_static(b"{\"a\":1}"), &mut dst)
        .unwrap();

    // Then
    assert_that!(dst.len(), eq(HEADER_LEN + 8));
    assert_that!(&dst[..2], eq(b"8\0".as_slice()));
    assert_that!(dst[HEADER_LEN + 7], eq(0u8));
}

#[test]
fn given_partial_header_when_decoded_then_waits() {
    let mut codec = FrameCodec::new();
    let mut src = BytesMut::from(&b"12"[..]);
    assert!(codec.decode(&mut src).unwrap().is_none());
}

#[test]
fn given_partial_payload_when_decoded_then_waits_without_consuming() {
    // Given
    let mut codec = FrameCodec::new();
    let mut src = frame(b"{\"a\":1}\0");
    src.truncate(HEADER_LEN + 3);

    // When
    let result = codec.decode(&mut src).unwrap();

    // Then
    assert!(result.is_none());
    assert_that!(src.len(), eq(HEADER_LEN + 3));
}

#[test]
fn given_terminated_payload_when_decoded_then_terminator_stripped() {
    let mut codec = FrameCodec::new();
    let mut src = frame(b"{}\0");
    let payload = codec.decode(&mut src).unwrap().unwrap();
    assert_that!(payload.as_ref(), eq(b"{}".as_slice()));
    assert!(src.is_empty());
}

#[test]
fn given_unterminated_payload_when_decoded_then_accepted() {
    let mut codec = FrameCodec::new();
    let mut src = frame(b"{}");
    let payload = codec.decode(&mut src).unwrap().unwrap();
    assert_that!(payload.as_ref(), eq(b"{}".as_slice()));
}

#[test]
fn given_two_frames_in_buffer_when_decoded_then_both_returned() {
    // Given
    let mut codec = FrameCodec::new();
    let mut src = frame(b"[1]\0");
    src.extend_from_slice(&frame(b"[2]\0"));

    // When
    let first = codec.decode(&mut src).unwrap().unwrap();
    let second = codec.decode(&mut src).unwrap().unwrap();

    // Then
    assert_that!(first.as_ref(), eq(b"[1]".as_slice()));
    assert_that!(second.as_ref(), eq(b"[2]".as_slice()));
}

#[test]
fn given_non_numeric_header_when_decoded_then_invalid_header() {
    let mut codec = FrameCodec::new();
    let mut src = BytesMut::from(&[b'x'; HEADER_LEN][..]);
    let result = codec.decode(&mut src);
    assert!(matches!(result, Err(ProtoError::InvalidHeader { .. })));
}

#[test]
fn given_oversized_header_when_decoded_then_frame_too_large() {
    // Given
    let mut codec = FrameCodec::with_max_frame_len(16);
    let mut src = frame(&[b'a'; 17]);

    // When
    let result = codec.decode(&mut src);

    // Then
    assert!(matches!(result, Err(ProtoError::FrameTooLarge { size: 17, .. })));
}

#[test]
fn given_oversized_payload_when_encoded_then_error() {
    let mut codec = FrameCodec::with_max_frame_len(4);
    let mut dst = BytesMut::new();
    let result = codec.encode(Bytes::from_static(b"abcd"), &mut dst);
    assert_that!(result, err(anything()));
}

#[tokio::test]
async fn given_framed_pair_when_payload_sent_then_peer_receives_it() {
    // Given
    let (left, right) = tokio::io::duplex(1024);
    let mut sender = Framed::new(left, FrameCodec::new());
    let mut receiver = Framed::new(right, FrameCodec::new());

    // When
    sender.send(Bytes::from_static(b"{\"x\":true}")).await.unwrap();
    let received = receiver.next().await.unwrap().unwrap();

    // Then
    assert_that!(received.as_ref(), eq(b"{\"x\":true}".as_slice()));
}
