//! Core reading types for barograph dashboards.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::ParseError;

/// When a reading was taken.
///
/// Pairs the instant used for ordering and axis labels with the sender's
/// original timestamp string, which is kept verbatim for display. Senders
/// that omit the timestamp, or send one that does not parse as RFC 3339,
/// get the receipt time instead; a bad timestamp is never a reason to drop
/// a reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timestamp {
    /// The instant backing `epoch_ms` and axis labels.
    #[serde(with = "time::serde::rfc3339")]
    pub instant: OffsetDateTime,
    /// The timestamp string exactly as the sender supplied it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

impl Timestamp {
    /// Build a timestamp from an optional wire string, falling back to the
    /// receipt time when the string is absent or unparseable.
    #[must_use]
    pub fn from_wire(original: Option<String>, received_at: OffsetDateTime) -> Self {
        let instant = original
            .as_deref()
            .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok())
            .unwrap_or(received_at);
        Self { instant, original }
    }

    /// Build a timestamp from a known instant with no original string.
    #[must_use]
    pub fn from_instant(instant: OffsetDateTime) -> Self {
        Self {
            instant,
            original: None,
        }
    }

    /// The instant as milliseconds since the Unix epoch.
    #[must_use]
    pub fn epoch_ms(&self) -> i64 {
        (self.instant.unix_timestamp_nanos() / 1_000_000) as i64
    }

    /// Short `HH:MM:SS` label for the shared chart axis.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.instant.hour(),
            self.instant.minute(),
            self.instant.second()
        )
    }
}

/// One decoded sensor observation.
///
/// A reading is immutable once constructed. The only derived quantity is the
/// calibrated pressure, computed on read via [`calibrated`](Self::calibrated);
/// the buffered raw value never changes.
///
/// Auxiliary fields (`temp_or_status`, `battery_v`, `external_v`, `gsm_pct`,
/// `raw`) are carried through unvalidated and may be absent. Display layers
/// render absent values as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Opaque device identifier. Absent in single-device streams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// When the reading was taken (or received).
    pub timestamp: Timestamp,
    /// Raw pressure value. Required; a payload without it is not a reading.
    pub pressure_raw: f64,
    /// Temperature or device status code, as sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_or_status: Option<f64>,
    /// Battery voltage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_v: Option<f64>,
    /// External supply voltage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_v: Option<f64>,
    /// GSM signal strength percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gsm_pct: Option<f64>,
    /// Opaque diagnostic string from the sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Reading {
    /// Pressure with the given calibration offset applied.
    ///
    /// Calibration is a display-time transform: it never mutates history,
    /// and changing the offset retroactively changes the value returned for
    /// every buffered reading.
    #[must_use]
    pub fn calibrated(&self, offset: f64) -> f64 {
        self.pressure_raw + offset
    }

    /// Create a builder for constructing `Reading` with optional fields.
    pub fn builder() -> ReadingBuilder {
        ReadingBuilder::default()
    }
}

/// Builder for constructing `Reading` with optional fields.
///
/// Use [`build`](Self::build) for unchecked construction, or
/// [`try_build`](Self::try_build) for validation of field values.
#[derive(Debug)]
#[must_use]
pub struct ReadingBuilder {
    reading: Reading,
}

impl Default for ReadingBuilder {
    fn default() -> Self {
        Self {
            reading: Reading {
                device_id: None,
                timestamp: Timestamp::from_instant(OffsetDateTime::UNIX_EPOCH),
                pressure_raw: 0.0,
                temp_or_status: None,
                battery_v: None,
                external_v: None,
                gsm_pct: None,
                raw: None,
            },
        }
    }
}

impl ReadingBuilder {
    /// Set the device identifier.
    pub fn device_id(mut self, id: impl Into<String>) -> Self {
        self.reading.device_id = Some(id.into());
        self
    }

    /// Set the timestamp.
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.reading.timestamp = timestamp;
        self
    }

    /// Set the raw pressure value.
    pub fn pressure_raw(mut self, pressure: f64) -> Self {
        self.reading.pressure_raw = pressure;
        self
    }

    /// Set the temperature/status value.
    pub fn temp_or_status(mut self, value: f64) -> Self {
        self.reading.temp_or_status = Some(value);
        self
    }

    /// Set the battery voltage.
    pub fn battery_v(mut self, value: f64) -> Self {
        self.reading.battery_v = Some(value);
        self
    }

    /// Set the external supply voltage.
    pub fn external_v(mut self, value: f64) -> Self {
        self.reading.external_v = Some(value);
        self
    }

    /// Set the GSM signal percentage.
    pub fn gsm_pct(mut self, value: f64) -> Self {
        self.reading.gsm_pct = Some(value);
        self
    }

    /// Set the diagnostic string.
    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.reading.raw = Some(raw.into());
        self
    }

    /// Build the `Reading` without validation.
    #[must_use]
    pub fn build(self) -> Reading {
        self.reading
    }

    /// Build the `Reading` with validation.
    ///
    /// Validates that `pressure_raw` is finite. Auxiliary fields are carried
    /// through as-is and are not checked.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidValue`] if the pressure is NaN or infinite.
    pub fn try_build(self) -> Result<Reading, ParseError> {
        if !self.reading.pressure_raw.is_finite() {
            return Err(ParseError::InvalidValue(format!(
                "pressure {} is not a finite number",
                self.reading.pressure_raw
            )));
        }
        Ok(self.reading)
    }
}
