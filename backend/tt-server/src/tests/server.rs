use crate::{Server, ServerError, session_limits};

use tt_config::Config;
use tt_session::SessionState;

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_config_when_mapped_then_limits_carried_over() {
    // Given
    let mut config = Config::default();
    config.server.max_connections = 7;
    config.limits.max_queue = 4;
    config.limits.max_hashtags = 2;

    // When
    let limits = session_limits(&config);

    // Then
    assert_that!(limits.max_users, eq(7));
    assert_that!(limits.max_queue, eq(4));
    assert_that!(limits.hashtag_rules.max_tags, eq(2));
    assert_that!(
        limits.hashtag_rules.max_body_len,
        eq(config.limits.max_tweet_len)
    );
}

#[tokio::test]
async fn given_ephemeral_port_when_bound_then_local_addr_known() {
    // Given
    let state = SessionState::default();

    // When
    let server = Server::bind("127.0.0.1:0", state).await.unwrap();

    // Then
    let addr = server.local_addr().unwrap();
    assert!(addr.port() > 0);
}

#[tokio::test]
async fn given_port_in_use_when_bound_then_bind_error() {
    // Given
    let first = Server::bind("127.0.0.1:0", SessionState::default())
        .await
        .unwrap();
    let addr = first.local_addr().unwrap().to_string();

    // When
    let result = Server::bind(&addr, SessionState::default()).await;

    // Then
    assert!(matches!(result, Err(ServerError::Bind { .. })));
}

#[tokio::test]
async fn given_running_server_when_shutdown_then_run_returns() {
    // Given
    let state = SessionState::default();
    let server = Server::bind("127.0.0.1:0", state.clone()).await.unwrap();
    let task = tokio::spawn(server.run());

    // When
    state.shutdown.shutdown();

    // Then
    let result = tokio::time::timeout(std::time::Duration::from_secs(1), task)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}
