//! Core dashboard logic for barograph.
//!
//! This crate ties the wire decoder and the rolling store together:
//!
//! - [`events`]: the inbound event model every state change flows through
//! - [`reducer`]: the pure dashboard state reducer
//! - [`config`]: dashboard configuration (endpoint, device list, offset,
//!   capacity)
//! - [`client`]: the WebSocket client that turns text frames into events
//!
//! # Example
//!
//! ```
//! use barograph_core::{DashboardState, InboundEvent, reduce};
//! use barograph_store::DeviceSet;
//! use barograph_types::Reading;
//!
//! let state = DashboardState::new(240, DeviceSet::parse("well-3"));
//! let event = InboundEvent::Reading {
//!     reading: Reading::builder()
//!         .device_id("well-3")
//!         .pressure_raw(1013.2)
//!         .build(),
//! };
//!
//! let state = reduce(state, event);
//! assert_eq!(state.snapshot().series("well-3").unwrap().len(), 1);
//! ```

pub mod client;
pub mod config;
pub mod events;
pub mod reducer;

pub use client::{ClientError, SocketClient};
pub use config::{ConfigError, DashboardConfig, ValidationError, default_config_path};
pub use events::{
    ConnectionStatus, EventReceiver, EventSender, InboundEvent, default_event_channel,
    event_channel,
};
pub use reducer::{DashboardState, reduce};
