use crate::{CliClientResult, ClientError};

use tt_proto::{FrameCodec, Request, ResponseEnvelope};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

/// How long `exit` waits for the server's acknowledgment
const EXIT_ACK_TIMEOUT: Duration = Duration::from_millis(500);

/// Framed TCP client for the ttweet server
pub struct Client {
    framed: Framed<TcpStream, FrameCodec>,
    username: String,
    user_idx: Option<i64>,
}

impl Client {
    /// Open a connection. The username is not validated until [`Client::validate`].
    pub async fn connect(host: &str, port: u16, username: &str) -> CliClientResult<Self> {
        let addr = format!("{host}:{port}");
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| ClientError::Connect {
                addr: addr.clone(),
                location: ErrorLocation::from(Location::caller()),
                source,
            })?;

        Ok(Self {
            framed: Framed::new(stream, FrameCodec::new()),
            username: String::from(username),
            user_idx: None,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Slot index assigned by the server once validated
    pub fn user_idx(&self) -> Option<i64> {
        self.user_idx
    }

    /// Claim the username. A rejection carries the server's message.
    pub async fn validate(&mut self) -> CliClientResult<ResponseEnvelope> {
        let request = Request::ValidateUser {
            username: self.username.clone(),
        };
        let response = self.send(&request).await?;

        if response.is_valid != Some(true) {
            return Err(ClientError::rejected(response.message()));
        }

        self.user_idx = response.client_user_idx;
        Ok(response)
    }

    /// Send one request and wait for its response.
    pub async fn send(&mut self, request: &Request) -> CliClientResult<ResponseEnvelope> {
        let payload = request.encode(&self.username, self.user_idx)?;
        self.framed.send(payload).await?;
        self.receive().await
    }

    /// Send `EXIT` and close. A missing acknowledgment, or a server that
    /// is already gone, is not an error.
    pub async fn exit(mut self) -> CliClientResult<Option<ResponseEnvelope>> {
        let payload = Request::Exit.encode(&self.username, self.user_idx)?;
        if self.framed.send(payload).await.is_err() {
            return Ok(None);
        }

        match tokio::time::timeout(EXIT_ACK_TIMEOUT, self.receive()).await {
            Ok(Ok(response)) => Ok(Some(response)),
            Ok(Err(_)) | Err(_) => Ok(None),
        }
    }

    async fn receive(&mut self) -> CliClientResult<ResponseEnvelope> {
        let frame = self.framed.next().await.ok_or_else(ClientError::closed)??;
        Ok(ResponseEnvelope::decode(&frame)?)
    }
}
