//! Rolling multi-series store implementation.

use std::collections::HashMap;
use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace};

use barograph_types::Reading;

use crate::series::Series;

/// Series key used when the store runs in single-device mode (empty device
/// set). Readings are buffered under this key and their `device_id` is
/// ignored.
pub const SINGLE_DEVICE_KEY: &str = "default";

/// The ordered set of device identifiers currently of interest.
///
/// Parsed from user configuration (a comma-separated list). An empty set
/// puts the store in single-device mode. Readings for devices outside the
/// set are discarded by the store; that is a filter, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceSet {
    ids: Vec<String>,
}

impl DeviceSet {
    /// The empty set (single-device mode).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a comma-separated device list, trimming whitespace, skipping
    /// empty entries, and de-duplicating while preserving first-seen order.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut ids = Vec::new();
        for part in input.split(',') {
            let id = part.trim();
            if !id.is_empty() && !ids.iter().any(|existing| existing == id) {
                ids.push(id.to_string());
            }
        }
        Self { ids }
    }

    /// Build from already-separated identifiers, de-duplicating in order.
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for id in ids {
            let id = id.into();
            if !id.is_empty() && !set.ids.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    /// Whether the set is empty (single-device mode).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of devices in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set contains a device id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Iterate device ids in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// One entry on the shared display-time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLabel {
    /// Milliseconds since the Unix epoch, for sorting.
    pub epoch_ms: i64,
    /// Formatted display label.
    pub label: String,
}

/// Rolling multi-series store: per-device bounded [`Series`] plus one shared
/// display-time axis, both trimmed to the same capacity.
///
/// The shared axis advances on every accepted reading regardless of device,
/// so per-device series length and axis length diverge when devices report
/// at different rates. Consumers pair series values against the axis by
/// position; see [`ChartData`](crate::chart::ChartData).
///
/// Every operation is a synchronous, total, in-memory state transition. The
/// only "failure" mode is silently discarding readings for devices outside
/// the configured set.
#[derive(Debug, Clone)]
pub struct Store {
    capacity: usize,
    devices: DeviceSet,
    series: HashMap<String, Series>,
    axis: VecDeque<AxisLabel>,
    latest: HashMap<String, Reading>,
    calibration_offset: f64,
}

impl Store {
    /// Create a store with the given capacity and device set.
    ///
    /// A zero capacity is bumped to one; callers are expected to validate
    /// configuration upstream.
    #[must_use]
    pub fn new(capacity: usize, devices: DeviceSet) -> Self {
        Self {
            capacity: capacity.max(1),
            devices,
            series: HashMap::new(),
            axis: VecDeque::new(),
            latest: HashMap::new(),
            calibration_offset: 0.0,
        }
    }

    /// Buffer capacity shared by every series and the axis.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The active device set.
    #[must_use]
    pub fn device_set(&self) -> &DeviceSet {
        &self.devices
    }

    /// Current calibration offset.
    #[must_use]
    pub fn calibration_offset(&self) -> f64 {
        self.calibration_offset
    }

    /// Series keys in display order: configured order in multi-device mode,
    /// the single implicit key otherwise.
    pub fn active_keys(&self) -> Vec<String> {
        if self.devices.is_empty() {
            vec![SINGLE_DEVICE_KEY.to_string()]
        } else {
            self.devices.iter().map(str::to_string).collect()
        }
    }

    fn series_key(&self, reading: &Reading) -> Option<String> {
        if self.devices.is_empty() {
            return Some(SINGLE_DEVICE_KEY.to_string());
        }
        match reading.device_id.as_deref() {
            Some(id) if self.devices.contains(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Accept one reading into the store.
    ///
    /// Readings for devices outside the active set are discarded with no
    /// state change. Otherwise the reading is appended to its device's
    /// series, the shared axis advances in lockstep, and the latest-reading
    /// lookup is updated unconditionally: last-arrived wins, even when the
    /// reading is older by timestamp, because arrival order is authoritative.
    ///
    /// Returns whether the reading was accepted.
    pub fn accept(&mut self, reading: Reading) -> bool {
        let Some(key) = self.series_key(&reading) else {
            trace!(device = ?reading.device_id, "discarding reading outside device set");
            return false;
        };

        self.axis.push_back(AxisLabel {
            epoch_ms: reading.timestamp.epoch_ms(),
            label: reading.timestamp.label(),
        });
        while self.axis.len() > self.capacity {
            self.axis.pop_front();
        }

        self.series
            .entry(key.clone())
            .or_default()
            .push_bounded(reading.clone(), self.capacity);
        self.latest.insert(key, reading);
        true
    }

    /// Replace the active device set.
    ///
    /// Series and latest entries for devices no longer in the set are
    /// dropped; newly added devices get a series lazily on their first
    /// reading. History for a device that is removed and later re-added is
    /// gone; there is no resurrection.
    pub fn reconfigure_devices(&mut self, new_set: DeviceSet) {
        self.devices = new_set;
        let devices = self.devices.clone();
        let keep = move |key: &str| {
            if devices.is_empty() {
                key == SINGLE_DEVICE_KEY
            } else {
                devices.contains(key)
            }
        };
        self.series.retain(|key, _| keep(key));
        self.latest.retain(|key, _| keep(key));
        debug!(devices = self.devices.len(), "device set reconfigured");
    }

    /// Set the calibration offset.
    ///
    /// Takes effect immediately for all derived-pressure reads of both new
    /// and already-buffered readings; raw values are unchanged.
    pub fn set_calibration_offset(&mut self, delta: f64) {
        self.calibration_offset = delta;
    }

    /// Empty every series and the shared axis.
    ///
    /// The device set and the latest-reading lookup are retained; clearing
    /// only acts on the plotted history.
    pub fn clear(&mut self) {
        for series in self.series.values_mut() {
            series.clear();
        }
        self.axis.clear();
    }

    /// Immutable snapshot of the current state.
    ///
    /// The snapshot owns its data: later `accept` calls never mutate a
    /// snapshot already handed out.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let devices = self.active_keys();
        let series = devices
            .iter()
            .map(|key| {
                let series = self.series.get(key).cloned().unwrap_or_default();
                (key.clone(), series)
            })
            .collect();
        StoreSnapshot {
            devices,
            series,
            axis: self.axis.iter().cloned().collect(),
            latest: self.latest.clone(),
            calibration_offset: self.calibration_offset,
        }
    }
}

/// Immutable view of the store at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    /// Active series keys in display order.
    pub devices: Vec<String>,
    /// Per-device series, one entry per active key.
    pub series: HashMap<String, Series>,
    /// The shared display-time axis.
    pub axis: Vec<AxisLabel>,
    /// Latest reading per device, last-arrived wins.
    pub latest: HashMap<String, Reading>,
    /// Calibration offset in effect when the snapshot was taken.
    pub calibration_offset: f64,
}

impl StoreSnapshot {
    /// Series for a device key, if active.
    #[must_use]
    pub fn series(&self, key: &str) -> Option<&Series> {
        self.series.get(key)
    }

    /// Latest reading for a device key.
    #[must_use]
    pub fn latest(&self, key: &str) -> Option<&Reading> {
        self.latest.get(key)
    }

    /// Whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axis.is_empty() && self.series.values().all(Series::is_empty)
    }
}
