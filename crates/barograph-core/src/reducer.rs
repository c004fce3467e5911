//! Pure dashboard state reducer.
//!
//! The source-of-truth state behind a dashboard page, updated by folding
//! [`InboundEvent`]s. The reducer has no transport or rendering dependency,
//! so the whole update path is testable with plain values.

use tracing::debug;

use barograph_store::{DeviceSet, Store, StoreSnapshot};

use crate::events::{ConnectionStatus, InboundEvent};

/// Client-side dashboard state: the rolling store plus connection status,
/// the last server-reported error, and the pause flag.
///
/// All mutation is synchronous; one event is applied to completion before
/// the next. Buffered readings survive connection transitions and are only
/// removed by eviction or [`clear`](Self::clear).
#[derive(Debug, Clone)]
pub struct DashboardState {
    store: Store,
    connection: ConnectionStatus,
    last_error: Option<String>,
    paused: bool,
}

impl DashboardState {
    /// Create dashboard state with the given buffer capacity and device set.
    #[must_use]
    pub fn new(capacity: usize, devices: DeviceSet) -> Self {
        Self {
            store: Store::new(capacity, devices),
            connection: ConnectionStatus::Idle,
            last_error: None,
            paused: false,
        }
    }

    /// Apply one event, returning whether it changed state.
    ///
    /// Readings are dropped while paused or when filtered by the device set;
    /// server errors update the error line without touching the buffers;
    /// connection transitions never touch buffered data.
    pub fn apply(&mut self, event: InboundEvent) -> bool {
        match event {
            InboundEvent::Reading { reading } => {
                if self.paused {
                    return false;
                }
                self.store.accept(reading)
            }
            InboundEvent::ServerError { message } => {
                debug!(%message, "server-reported error");
                self.last_error = Some(message);
                true
            }
            InboundEvent::Connection { status } => {
                self.connection = status;
                true
            }
        }
    }

    /// The rolling series store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Current connection status.
    #[must_use]
    pub fn connection(&self) -> &ConnectionStatus {
        &self.connection
    }

    /// Last server-reported error, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether reading intake is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume reading intake. Readings arriving while paused are
    /// dropped, not queued.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Set the calibration offset; applies to all buffered readings at once.
    pub fn set_calibration_offset(&mut self, delta: f64) {
        self.store.set_calibration_offset(delta);
    }

    /// Replace the active device set.
    pub fn reconfigure_devices(&mut self, devices: DeviceSet) {
        self.store.reconfigure_devices(devices);
    }

    /// Clear the plotted history (series and axis only).
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Immutable snapshot of the buffered state.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }
}

/// Pure reducer form: fold one event into a state value.
#[must_use]
pub fn reduce(mut state: DashboardState, event: InboundEvent) -> DashboardState {
    state.apply(event);
    state
}
