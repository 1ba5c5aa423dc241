#![allow(dead_code)]

//! Test infrastructure for end-to-end server tests

use tt_proto::{FrameCodec, Request, ResponseEnvelope};
use tt_server::Server;
use tt_session::{SessionLimits, SessionState};

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_util::codec::Framed;

/// Server running on an ephemeral localhost port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: SessionState,
    task: JoinHandle<tt_server::Result<()>>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.state.shutdown.shutdown();
        self.task.abort();
    }
}

pub async fn start_server(max_users: usize) -> TestServer {
    let state = SessionState::new(SessionLimits {
        max_users,
        ..SessionLimits::default()
    });
    let server = Server::bind("127.0.0.1:0", state.clone())
        .await
        .expect("Failed to bind test server");
    let addr = server.local_addr().expect("Failed to read bound address");
    let task = tokio::spawn(server.run());

    TestServer { addr, state, task }
}

/// Minimal client speaking the framed protocol.
pub struct TestClient {
    framed: Framed<TcpStream, FrameCodec>,
    username: String,
}

impl TestClient {
    pub async fn connect(addr: SocketAddr, username: &str) -> Self {
        let stream = TcpStream::connect(addr)
            .await
            .expect("Failed to connect to test server");
        Self {
            framed: Framed::new(stream, FrameCodec::new()),
            username: String::from(username),
        }
    }

    pub async fn request(&mut self, request: Request) -> ResponseEnvelope {
        let payload = request
            .encode(&self.username, None)
            .expect("Failed to encode request");
        self.framed
            .send(payload)
            .await
            .expect("Failed to send request");

        let frame = tokio::time::timeout(Duration::from_secs(2), self.framed.next())
            .await
            .expect("Timed out waiting for response")
            .expect("Connection closed before response")
            .expect("Failed to decode frame");
        ResponseEnvelope::decode(&frame).expect("Failed to decode response")
    }

    pub async fn validate(&mut self) -> ResponseEnvelope {
        let username = self.username.clone();
        self.request(Request::ValidateUser { username }).await
    }

    pub async fn subscribe(&mut self, hashtag: &str) -> ResponseEnvelope {
        self.request(Request::Subscribe {
            hashtag: String::from(hashtag),
        })
        .await
    }

    pub async fn tweet(&mut self, body: &str, hashtags: &[&str]) -> ResponseEnvelope {
        self.request(Request::Tweet {
            body: String::from(body),
            hashtags: hashtags.iter().map(|t| String::from(*t)).collect(),
        })
        .await
    }

    pub async fn timeline(&mut self) -> Vec<String> {
        self.request(Request::Timeline)
            .await
            .stored_tweets
            .unwrap_or_default()
    }

    /// Wait for the server to close the connection.
    pub async fn closed(&mut self) -> bool {
        matches!(
            tokio::time::timeout(Duration::from_secs(2), self.framed.next()).await,
            Ok(None) | Ok(Some(Err(_)))
        )
    }
}

/// Poll until `condition` holds or a short deadline passes.
pub async fn eventually<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..50 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}
