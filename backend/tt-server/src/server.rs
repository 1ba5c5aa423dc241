use crate::error::{Result as ServerErrorResult, ServerError};

use tt_config::Config;
use tt_core::HashtagRules;
use tt_session::{ClientConnection, SessionLimits, SessionState};

use std::net::SocketAddr;
use std::panic::Location;

use error_location::ErrorLocation;
use log::{error, info, warn};
use tokio::net::{TcpListener, TcpStream};

/// Listening socket plus the state every connection shares.
pub struct Server {
    listener: TcpListener,
    state: SessionState,
}

impl Server {
    pub async fn bind(addr: &str, state: SessionState) -> ServerErrorResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: String::from(addr),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> ServerErrorResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Accept connections until shutdown is triggered.
    ///
    /// Each connection runs on its own task; accept failures are logged and
    /// the loop carries on.
    pub async fn run(self) -> ServerErrorResult<()> {
        let mut shutdown_guard = self.state.shutdown.subscribe_guard();
        info!("Server ready to accept connections");

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tokio::spawn(handle_socket(stream, peer, self.state.clone()));
                    }
                    Err(e) => warn!("Failed to accept connection: {}", e),
                },
                _ = shutdown_guard.wait() => {
                    info!("Accept loop stopped");
                    break;
                }
            }
        }

        Ok(())
    }
}

async fn handle_socket(stream: TcpStream, peer: SocketAddr, state: SessionState) {
    if let Err(e) = stream.set_nodelay(true) {
        warn!("Failed to set TCP_NODELAY for {}: {}", peer, e);
    }

    let shutdown_guard = state.shutdown.subscribe_guard();
    let connection = ClientConnection::new(state, Some(peer));

    if let Err(e) = connection.handle(stream, shutdown_guard).await {
        error!("Connection {peer} error: {e}");
    }
}

/// Session limits derived from the loaded configuration.
pub fn session_limits(config: &Config) -> SessionLimits {
    SessionLimits {
        max_users: config.server.max_connections,
        max_subscriptions: config.limits.max_subscriptions,
        max_queue: config.limits.max_queue,
        max_username_len: config.limits.max_username_len,
        hashtag_rules: HashtagRules {
            max_tag_len: config.limits.max_hashtag_len,
            max_tags: config.limits.max_hashtags,
            max_body_len: config.limits.max_tweet_len,
        },
    }
}
