//! Rolling in-memory series store for barograph dashboards.
//!
//! This crate owns the client-side state behind the live charts: one bounded
//! [`Series`] per device, a shared display-time axis trimmed to the same
//! capacity, the latest-reading lookup, the calibration offset, and the
//! chart-ready output shape the renderer consumes.
//!
//! Everything here is synchronous and in-memory; nothing persists across
//! process restarts.
//!
//! # Example
//!
//! ```
//! use barograph_store::{DeviceSet, Store};
//! use barograph_types::Reading;
//!
//! let mut store = Store::new(240, DeviceSet::parse("well-3,pump-1"));
//! let reading = Reading::builder()
//!     .device_id("well-3")
//!     .pressure_raw(1013.2)
//!     .build();
//!
//! store.accept(reading);
//! let snapshot = store.snapshot();
//! assert_eq!(snapshot.series("well-3").unwrap().len(), 1);
//! ```

pub mod chart;
pub mod color;
pub mod series;
pub mod store;

pub use chart::{ChartData, ChartSeries};
pub use color::{DeviceColor, assign_colors, color_for};
pub use series::Series;
pub use store::{AxisLabel, DeviceSet, SINGLE_DEVICE_KEY, Store, StoreSnapshot};
