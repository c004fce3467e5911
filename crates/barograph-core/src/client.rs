//! WebSocket client feeding the dashboard event channel.
//!
//! Connects to a `ws://`/`wss://` endpoint, decodes each text frame with the
//! shared [`Decoder`], and forwards one [`InboundEvent`] per relevant frame
//! in arrival order. Connection transitions are reported on the same
//! channel. There is no reconnection: when the stream ends, the client
//! reports the disconnect and returns. Reconnecting, if desired, is the
//! consuming layer's responsibility.

use futures::StreamExt;
use time::OffsetDateTime;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use barograph_types::{Decoded, Decoder};

use crate::events::{ConnectionStatus, EventSender, InboundEvent};

/// Error type for socket client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint URL is not a WebSocket URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The connection could not be established.
    #[error("WebSocket connect failed: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Result type for socket client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// WebSocket client for one dashboard connection.
#[derive(Debug, Clone)]
pub struct SocketClient {
    url: String,
    decoder: Decoder,
}

impl SocketClient {
    /// Create a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] unless the URL starts with
    /// `ws://` or `wss://`.
    pub fn new(url: &str, decoder: Decoder) -> Result<Self> {
        if !url.starts_with("ws://") && !url.starts_with("wss://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with ws:// or wss://, got: {url}"
            )));
        }
        Ok(Self {
            url: url.to_string(),
            decoder,
        })
    }

    /// The endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connect and pump frames into the event channel until the stream ends.
    ///
    /// Emits `Connecting` before the handshake, `Connected` after, then one
    /// event per decoded reading or server error, and finally `Disconnected`
    /// with the transport's reason. Returns `Ok(())` on a clean or dirty
    /// stream end; a failed connect additionally returns the error so the
    /// caller can report it out-of-band.
    ///
    /// Dropping the receiving end of the channel stops the client.
    pub async fn run(self, events: EventSender) -> Result<()> {
        if send_status(&events, ConnectionStatus::Connecting).await.is_err() {
            return Ok(());
        }

        info!(url = %self.url, "connecting");
        let (mut ws, _) = match connect_async(self.url.as_str()).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(url = %self.url, error = %e, "connect failed");
                let _ = send_status(
                    &events,
                    ConnectionStatus::Disconnected {
                        reason: Some(e.to_string()),
                    },
                )
                .await;
                return Err(e.into());
            }
        };

        info!(url = %self.url, "connected");
        if send_status(&events, ConnectionStatus::Connected).await.is_err() {
            return Ok(());
        }

        let mut reason = None;
        while let Some(item) = ws.next().await {
            match item {
                Ok(Message::Text(text)) => {
                    let event =
                        match self.decoder.decode(text.as_str(), OffsetDateTime::now_utc()) {
                            Decoded::Reading(reading) => InboundEvent::Reading { reading },
                            Decoded::ServerError(notice) => {
                                debug!(message = %notice.message, "server-reported error");
                                InboundEvent::ServerError {
                                    message: notice.message,
                                }
                            }
                            Decoded::Handshake | Decoded::Ignored => continue,
                        };
                    if events.send(event).await.is_err() {
                        debug!("event receiver dropped, stopping client");
                        return Ok(());
                    }
                }
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "peer closed the connection");
                    break;
                }
                // Binary, ping, and pong frames carry no readings.
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "receive error");
                    reason = Some(e.to_string());
                    break;
                }
            }
        }

        let _ = send_status(&events, ConnectionStatus::Disconnected { reason }).await;
        Ok(())
    }
}

async fn send_status(
    events: &EventSender,
    status: ConnectionStatus,
) -> std::result::Result<(), tokio::sync::mpsc::error::SendError<InboundEvent>> {
    events.send(InboundEvent::Connection { status }).await
}
