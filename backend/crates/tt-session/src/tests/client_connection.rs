use crate::tests::{state, tags};
use crate::{ClientConnection, SessionLimits, SessionState, SlotId};

use tt_proto::{FrameCodec, Request, ResponseCode, ResponseEnvelope};

use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use googletest::assert_that;
use googletest::prelude::{eq, some};
use tokio::io::DuplexStream;
use tokio::task::JoinHandle;
use tokio::time::{Duration, timeout};
use tokio_util::codec::Framed;

type ClientSide = Framed<DuplexStream, FrameCodec>;

fn connect(state: &SessionState) -> (ClientSide, JoinHandle<crate::Result<()>>) {
    let (client, server) = tokio::io::duplex(4096);
    let guard = state.shutdown.subscribe_guard();
    let connection = ClientConnection::new(state.clone(), None);
    let task = tokio::spawn(connection.handle(server, guard));
    (Framed::new(client, FrameCodec::new()), task)
}

async fn exchange(client: &mut ClientSide, request: Request) -> ResponseEnvelope {
    client.send(request.encode("test", None).unwrap()).await.unwrap();
    receive(client).await
}

async fn receive(client: &mut ClientSide) -> ResponseEnvelope {
    let payload = timeout(Duration::from_secs(1), client.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    ResponseEnvelope::decode(&payload).unwrap()
}

fn validate(username: &str) -> Request {
    Request::ValidateUser {
        username: String::from(username),
    }
}

#[tokio::test]
async fn given_free_slot_when_validated_then_accepted_with_index() {
    // Given
    let state = state(2);
    let (mut client, _task) = connect(&state);

    // When
    let response = exchange(&mut client, validate("alice")).await;

    // Then
    assert_that!(response.code(), some(eq(ResponseCode::ValidateUser)));
    assert_eq!(response.is_valid, Some(true));
    assert_eq!(response.client_user_idx, Some(0));
    assert_that!(state.registry.occupied_count(), eq(1));
}

#[tokio::test]
async fn given_taken_name_when_validated_then_rejected_and_closed() {
    // Given
    let state = state(2);
    let (mut first, _first_task) = connect(&state);
    exchange(&mut first, validate("alice")).await;
    let (mut second, second_task) = connect(&state);

    // When
    let response = exchange(&mut second, validate("alice")).await;

    // Then
    assert_eq!(response.is_valid, Some(false));
    assert_that!(response.message(), eq("username taken"));
    let result = timeout(Duration::from_secs(1), second_task).await.unwrap().unwrap();
    assert!(result.is_ok());
    assert_that!(state.registry.occupied_count(), eq(1));
}

#[tokio::test]
async fn given_request_before_validation_when_sent_then_invalid_and_still_validating() {
    // Given
    let state = state(1);
    let (mut client, _task) = connect(&state);

    // When
    let rejected = exchange(&mut client, Request::Timeline).await;
    let accepted = exchange(&mut client, validate("alice")).await;

    // Then
    assert_that!(rejected.code(), some(eq(ResponseCode::Invalid)));
    assert_eq!(accepted.is_valid, Some(true));
}

#[tokio::test]
async fn given_bad_json_when_sent_then_invalid_and_session_continues() {
    // Given
    let state = state(1);
    let (mut client, _task) = connect(&state);
    exchange(&mut client, validate("alice")).await;

    // When
    client.send(Bytes::from_static(b"{not json")).await.unwrap();
    let rejected = receive(&mut client).await;
    let timeline = exchange(&mut client, Request::Timeline).await;

    // Then
    assert_that!(rejected.code(), some(eq(ResponseCode::Invalid)));
    assert_that!(timeline.code(), some(eq(ResponseCode::Timeline)));
}

#[tokio::test]
async fn given_full_server_when_new_client_validates_then_server_full() {
    // Given
    let state = state(1);
    let (mut first, _first_task) = connect(&state);
    exchange(&mut first, validate("alice")).await;
    let (mut second, second_task) = connect(&state);

    // When
    let response = exchange(&mut second, validate("bob")).await;

    // Then
    assert_eq!(response.is_valid, Some(false));
    assert_that!(response.message(), eq("server full"));
    let result = timeout(Duration::from_secs(1), second_task).await.unwrap().unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn given_backlog_larger_than_one_frame_when_timeline_then_rest_kept_for_next_poll() {
    // Given
    let state = SessionState::new(SessionLimits {
        max_users: 1,
        max_queue: 500,
        ..SessionLimits::default()
    });
    let (mut client, _task) = connect(&state);
    let alice = exchange(&mut client, validate("alice")).await;
    let slot = SlotId::new(0);
    exchange(
        &mut client,
        Request::Subscribe {
            hashtag: String::from("#news"),
        },
    )
    .await;
    let body = "x".repeat(150);
    for _ in 0..500 {
        state.fan_out.post("bob", &body, tags("#news"));
    }

    // When
    let first = exchange(&mut client, Request::Timeline).await;
    let held = state.registry.pending_count(slot);
    let second = exchange(&mut client, Request::Timeline).await;

    // Then
    assert_eq!(alice.is_valid, Some(true));
    assert_that!(first.code(), some(eq(ResponseCode::Timeline)));
    assert_that!(second.code(), some(eq(ResponseCode::Timeline)));
    let first = first.stored_tweets.unwrap_or_default();
    let second = second.stored_tweets.unwrap_or_default();
    assert!(held > 0);
    assert_that!(first.len() + held, eq(500));
    assert_that!(second.len(), eq(held));
    assert_that!(state.registry.occupied_count(), eq(1));
}

#[tokio::test]
async fn given_active_user_when_exit_then_acknowledged_and_slot_freed() {
    // Given
    let state = state(1);
    let (mut client, task) = connect(&state);
    exchange(&mut client, validate("alice")).await;

    // When
    let response = exchange(&mut client, Request::Exit).await;

    // Then
    assert_that!(response.code(), some(eq(ResponseCode::Exit)));
    assert_that!(state.registry.occupied_count(), eq(0));
    let result = timeout(Duration::from_secs(1), task).await.unwrap().unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn given_client_drops_when_connection_ends_then_slot_freed() {
    // Given
    let state = state(1);
    let (mut client, task) = connect(&state);
    exchange(&mut client, validate("alice")).await;

    // When
    drop(client);
    let result = timeout(Duration::from_secs(1), task).await.unwrap().unwrap();

    // Then
    assert!(result.is_ok());
    assert!(state.registry.has_free_slot());
}

#[tokio::test]
async fn given_bad_header_when_received_then_connection_fails() {
    // Given
    let state = state(1);
    let (client, task) = connect(&state);
    let mut raw = client.into_inner();

    // When
    tokio::io::AsyncWriteExt::write_all(&mut raw, &[b'x'; 32]).await.unwrap();
    let result = timeout(Duration::from_secs(1), task).await.unwrap().unwrap();

    // Then
    assert!(result.is_err());
}

#[tokio::test]
async fn given_shutdown_when_triggered_then_connection_closes_and_frees_slot() {
    // Given
    let state = state(1);
    let (mut client, task) = connect(&state);
    exchange(&mut client, validate("alice")).await;

    // When
    state.shutdown.shutdown();
    let result = timeout(Duration::from_secs(1), task).await.unwrap().unwrap();

    // Then
    assert!(result.is_ok());
    assert_that!(state.registry.occupied_count(), eq(0));
}
