//! Inbound event model for dashboard state updates.
//!
//! Every state change flows through one [`InboundEvent`]: a decoded reading,
//! a server-reported error, or a connection transition. The socket client
//! produces these; the reducer consumes them.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use barograph_types::Reading;

/// Connection lifecycle of the dashboard's transport.
///
/// There is no automatic retry: a disconnect stays a disconnect until the
/// consuming layer opens a new connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    /// No connection attempted yet.
    #[default]
    Idle,
    /// Connection in progress.
    Connecting,
    /// Connected and receiving frames.
    Connected,
    /// Connection ended or failed; the reason is surfaced to the user.
    Disconnected {
        /// Transport error text, or `None` for a clean close.
        reason: Option<String>,
    },
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Idle => write!(f, "idle"),
            ConnectionStatus::Connecting => write!(f, "connecting"),
            ConnectionStatus::Connected => write!(f, "connected"),
            ConnectionStatus::Disconnected { reason: None } => write!(f, "disconnected"),
            ConnectionStatus::Disconnected {
                reason: Some(reason),
            } => write!(f, "disconnected: {reason}"),
        }
    }
}

/// Events consumed by the dashboard reducer.
///
/// All events are serializable for logging and replay.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new event types
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum InboundEvent {
    /// A decoded sensor reading.
    Reading { reading: Reading },
    /// An explicit error message from the peer, surfaced verbatim.
    ServerError { message: String },
    /// The transport changed state.
    Connection { status: ConnectionStatus },
}

/// Sender for inbound events.
pub type EventSender = mpsc::Sender<InboundEvent>;

/// Receiver for inbound events.
pub type EventReceiver = mpsc::Receiver<InboundEvent>;

/// Create a new event channel with the given capacity.
pub fn event_channel(capacity: usize) -> (EventSender, EventReceiver) {
    mpsc::channel(capacity)
}

/// Create a default event channel with capacity 256.
pub fn default_event_channel() -> (EventSender, EventReceiver) {
    event_channel(256)
}
