//! Per-device bounded reading buffers.

use std::collections::VecDeque;

use serde::Serialize;

use barograph_types::Reading;

/// Ordered rolling buffer of readings for one device.
///
/// Insertion is append-only at the tail; once the buffer holds `capacity`
/// entries the oldest are evicted from the head, preserving order. The
/// capacity itself is owned by the store so that every series and the shared
/// axis trim identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    points: VecDeque<Reading>,
}

impl Series {
    /// Create an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reading, evicting from the head if the series would exceed
    /// `capacity`.
    pub fn push_bounded(&mut self, reading: Reading, capacity: usize) {
        self.points.push_back(reading);
        while self.points.len() > capacity {
            self.points.pop_front();
        }
    }

    /// Number of buffered readings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no readings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reading at a position, oldest first.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Reading> {
        self.points.get(index)
    }

    /// Iterate readings oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.points.iter()
    }

    /// Raw pressure values, oldest first.
    pub fn raw_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|r| r.pressure_raw)
    }

    /// Drop all buffered readings.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Reading;
    type IntoIter = std::collections::vec_deque::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
