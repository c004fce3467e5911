//! Chart-ready output shape for the rendering collaborator.
//!
//! The renderer consumes one shared label axis plus, per device, raw and
//! calibrated value sequences of equal length to the labels, with `None` at
//! positions the device has no value so gaps can be drawn.
//!
//! Pairing is positional: index `i` of a series lines up with index `i` of
//! the axis. Because the axis advances on every accepted reading while each
//! series advances only on its own device's readings, a slow device's points
//! can skew against the axis. That matches the observable behavior of the
//! dashboards this store backs; consumers wanting timestamp alignment must
//! do it themselves.

use serde::Serialize;

use crate::color::{DeviceColor, color_for};
use crate::store::StoreSnapshot;

/// Everything a chart needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    /// Shared X-axis labels, oldest first.
    pub labels: Vec<String>,
    /// One entry per active device, in display order.
    pub series: Vec<ChartSeries>,
}

/// One device's plottable sequences.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    /// Device identifier (series key).
    pub device_id: String,
    /// Deterministic display color for this device.
    pub color: DeviceColor,
    /// Raw pressure per axis position, `None` where the device has no value.
    pub raw: Vec<Option<f64>>,
    /// Calibrated pressure per axis position, same shape as `raw`.
    pub calibrated: Vec<Option<f64>>,
}

impl ChartData {
    /// Build chart data from a store snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &StoreSnapshot) -> Self {
        let labels: Vec<String> = snapshot.axis.iter().map(|l| l.label.clone()).collect();
        let series = snapshot
            .devices
            .iter()
            .map(|key| {
                let points = snapshot.series(key);
                let raw: Vec<Option<f64>> = (0..labels.len())
                    .map(|i| points.and_then(|s| s.get(i)).map(|r| r.pressure_raw))
                    .collect();
                let calibrated = raw
                    .iter()
                    .map(|v| v.map(|p| p + snapshot.calibration_offset))
                    .collect();
                ChartSeries {
                    device_id: key.clone(),
                    color: color_for(key),
                    raw,
                    calibrated,
                }
            })
            .collect();
        Self { labels, series }
    }
}
