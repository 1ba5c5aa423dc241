use crate::handlers::response_builder::{build_error_response, build_exit_response};
use crate::handlers::user::handle_validate_user;
use crate::{
    DispatchOutcome, HandlerContext, MetricsTimer, RequestContext, Result as SessionResult,
    SessionError, SessionState, ShutdownGuard, SlotLease, dispatch,
};

use tt_proto::{FrameCodec, Request, ResponseCode, ResponseEnvelope};

use std::fmt;
use std::net::SocketAddr;
use std::panic::Location;

use bytes::Bytes;
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;

/// Lifecycle of one client connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    /// Waiting for a username
    Validating,
    Active,
    /// Turned away for capacity
    Rejected,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connecting => "connecting",
            Self::Validating => "validating",
            Self::Active => "active",
            Self::Rejected => "rejected",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Serves one client: admission, validation, then one request at a time.
pub struct ClientConnection {
    state: SessionState,
    peer: Option<SocketAddr>,
    lease: Option<SlotLease>,
    connection_state: ConnectionState,
}

impl ClientConnection {
    pub fn new(state: SessionState, peer: Option<SocketAddr>) -> Self {
        Self {
            state,
            peer,
            lease: None,
            connection_state: ConnectionState::Connecting,
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection_state
    }

    /// Run the connection until the client leaves, fails or shutdown fires.
    ///
    /// The slot, if one was claimed, is free again when this returns.
    pub async fn handle<S>(mut self, stream: S, mut shutdown_guard: ShutdownGuard) -> SessionResult<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        info!("Connection from {} accepted", self.peer_label());
        self.state.metrics.connection_established();

        let mut framed = Framed::new(stream, FrameCodec::new());

        let result = if self.state.registry.has_free_slot() {
            self.transition(ConnectionState::Validating);
            self.serve(&mut framed, &mut shutdown_guard).await
        } else {
            self.transition(ConnectionState::Rejected);
            self.state.metrics.connection_rejected("capacity");
            self.reject_full(&mut framed, &mut shutdown_guard).await
        };

        if let Some(lease) = self.lease.take() {
            lease.release();
            self.state
                .metrics
                .users_active(self.state.registry.occupied_count());
        }
        if self.connection_state != ConnectionState::Rejected {
            self.transition(ConnectionState::Closed);
        }

        self.state
            .metrics
            .connection_closed(if result.is_ok() { "normal" } else { "error" });
        info!(
            "Connection from {} closed ({})",
            self.peer_label(),
            self.connection_state
        );

        result
    }

    async fn serve<S>(
        &mut self,
        framed: &mut Framed<S, FrameCodec>,
        shutdown_guard: &mut ShutdownGuard,
    ) -> SessionResult<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        loop {
            let frame = tokio::select! {
                frame = framed.next() => frame,
                _ = shutdown_guard.wait() => {
                    info!("Shutting down connection from {} gracefully", self.peer_label());
                    return Ok(());
                }
            };

            let payload = match frame {
                Some(Ok(payload)) => payload,
                Some(Err(e)) => {
                    error!("Framing error on connection from {}: {}", self.peer_label(), e);
                    self.state.metrics.error_occurred(crate::INVALID_MESSAGE);
                    return Err(SessionError::from(e));
                }
                None => {
                    info!("Connection from {} closed by client", self.peer_label());
                    return Ok(());
                }
            };

            match self.handle_frame(&payload, framed).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) if e.is_fatal() => {
                    error!("Connection from {} failed: {}", self.peer_label(), e);
                    return Err(e);
                }
                Err(e) => warn!("Request from {} not answered: {}", self.peer_label(), e),
            }
        }
    }

    /// Decode, route and answer one frame. Returns true when the
    /// connection should close after the response.
    async fn handle_frame<S>(
        &mut self,
        payload: &Bytes,
        framed: &mut Framed<S, FrameCodec>,
    ) -> SessionResult<bool>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let timer = MetricsTimer::new(self.state.metrics.clone());
        let request_ctx = RequestContext::new(
            self.peer,
            self.lease.as_ref().map(SlotLease::username),
            self.lease.as_ref().map(SlotLease::slot),
        );

        let outcome = match Request::decode(payload) {
            Ok(request) => match &self.lease {
                Some(lease) => {
                    dispatch(request, &HandlerContext::new(&self.state, lease, request_ctx))
                }
                None => {
                    let (outcome, lease) =
                        Self::handle_unvalidated(&self.state, request, &request_ctx);
                    if let Some(lease) = lease {
                        self.lease = Some(lease);
                        self.transition(ConnectionState::Active);
                    }
                    outcome
                }
            },
            Err(e) => {
                let e = SessionError::from(e);
                warn!(
                    "{} Undecodable request: {} (code: {})",
                    request_ctx.log_prefix(),
                    e,
                    e.error_code()
                );
                self.state.metrics.error_occurred(e.error_code());
                DispatchOutcome::reply(build_error_response(ResponseCode::Invalid, &e))
            }
        };

        if outcome.close {
            // EXIT frees the name before it is acknowledged
            if let Some(lease) = self.lease.take() {
                lease.release();
                self.state
                    .metrics
                    .users_active(self.state.registry.occupied_count());
            }
            self.transition(ConnectionState::Closed);
        }

        Self::send(framed, &outcome.response).await?;
        timer.finish();

        Ok(outcome.close)
    }

    /// Requests arriving before a username has been accepted.
    fn handle_unvalidated(
        state: &SessionState,
        request: Request,
        request_ctx: &RequestContext,
    ) -> (DispatchOutcome, Option<SlotLease>) {
        state.metrics.request_received(request.name());

        match request {
            Request::ValidateUser { username } => {
                match handle_validate_user(&username, state, request_ctx) {
                    Ok((lease, response)) => (DispatchOutcome::reply(response), Some(lease)),
                    Err(e) => {
                        warn!(
                            "{} Validation of '{}' failed: {} (code: {})",
                            request_ctx.log_prefix(),
                            username,
                            e,
                            e.error_code()
                        );
                        state.metrics.error_occurred(e.error_code());
                        let response = build_error_response(ResponseCode::ValidateUser, &e);
                        (DispatchOutcome::closing(response), None)
                    }
                }
            }
            Request::Exit => {
                info!("{} exit before validation", request_ctx.log_prefix());
                (DispatchOutcome::closing(build_exit_response()), None)
            }
            other => {
                let e = SessionError::NotValidated {
                    request: other.name(),
                    location: ErrorLocation::from(Location::caller()),
                };
                warn!("{} {}", request_ctx.log_prefix(), e);
                state.metrics.error_occurred(e.error_code());
                let response = build_error_response(ResponseCode::Invalid, &e);
                (DispatchOutcome::reply(response), None)
            }
        }
    }

    /// One receive/response cycle answering with a capacity rejection.
    async fn reject_full<S>(
        &mut self,
        framed: &mut Framed<S, FrameCodec>,
        shutdown_guard: &mut ShutdownGuard,
    ) -> SessionResult<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let frame = tokio::select! {
            frame = framed.next() => frame,
            _ = shutdown_guard.wait() => return Ok(()),
        };
        let Some(frame) = frame else {
            return Ok(());
        };
        let payload = frame?;

        let registry = &self.state.registry;
        let error = SessionError::ServerFull {
            current: registry.occupied_count(),
            max: registry.capacity(),
            location: ErrorLocation::from(Location::caller()),
        };
        warn!("Rejecting {}: {}", self.peer_label(), error);

        let response = match Request::decode(&payload) {
            Ok(Request::ValidateUser { .. }) => {
                build_error_response(ResponseCode::ValidateUser, &error)
            }
            _ => ResponseEnvelope::invalid(error.client_message()),
        };

        Self::send(framed, &response).await
    }

    async fn send<S>(
        framed: &mut Framed<S, FrameCodec>,
        response: &ResponseEnvelope,
    ) -> SessionResult<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let payload = response.encode()?;
        framed.send(payload).await?;
        Ok(())
    }

    fn transition(&mut self, next: ConnectionState) {
        debug!(
            "Connection from {}: {} -> {}",
            self.peer_label(),
            self.connection_state,
            next
        );
        self.connection_state = next;
    }

    fn peer_label(&self) -> String {
        self.peer
            .map(|peer| peer.to_string())
            .unwrap_or_else(|| String::from("local"))
    }
}
