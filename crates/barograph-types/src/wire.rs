//! Wire-frame classification for inbound dashboard messages.
//!
//! The transport delivers UTF-8 JSON text frames. Each frame is classified
//! into exactly one [`Decoded`] variant before any field is acted on, so
//! downstream branches stay exhaustive. The decoder is a total function:
//! malformed input is a no-op ([`Decoded::Ignored`]), never an error. The
//! producer is an untrusted network peer and dropping a bad frame must not
//! stall the stream.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::trace;

use crate::reading::{Reading, Timestamp};

/// A server-reported error carried in-band on the stream.
///
/// Surfaced verbatim to the connection-status layer; it does not close the
/// connection and produces no reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    /// Error text from the peer's `message` field.
    pub message: String,
    /// Timestamp string from the peer, if any.
    pub timestamp: Option<String>,
}

/// Classification of one inbound text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A validated sensor reading.
    Reading(Reading),
    /// An explicit error message from the peer.
    ServerError(ErrorNotice),
    /// A greeting/handshake frame. Structurally valid, no reading.
    Handshake,
    /// Anything else: unparseable JSON, missing required fields, or an
    /// unrecognized shape. Silently dropped.
    Ignored,
}

/// Decoder over raw text frames.
///
/// Multi-device streams require a non-empty `deviceId` on pressure payloads;
/// single-device streams ignore it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    require_device_id: bool,
}

impl Decoder {
    /// Decoder for a single-device stream (`deviceId` ignored).
    #[must_use]
    pub fn single_device() -> Self {
        Self {
            require_device_id: false,
        }
    }

    /// Decoder for a multi-device stream (`deviceId` required on readings).
    #[must_use]
    pub fn multi_device() -> Self {
        Self {
            require_device_id: true,
        }
    }

    /// Classify one raw text payload.
    ///
    /// `received_at` is used as the reading timestamp when the payload omits
    /// one or supplies one that does not parse. Never panics and never
    /// returns an error; anything that is not a recognizable frame comes
    /// back as [`Decoded::Ignored`].
    #[must_use]
    pub fn decode(&self, payload: &str, received_at: OffsetDateTime) -> Decoded {
        let value: Value = match serde_json::from_str(payload) {
            Ok(v) => v,
            Err(_) => {
                trace!("dropping unparseable frame");
                return Decoded::Ignored;
            }
        };
        self.classify(value, received_at, false)
    }

    fn classify(&self, value: Value, received_at: OffsetDateTime, unwrapped: bool) -> Decoded {
        if !value.is_object() {
            return Decoded::Ignored;
        }

        match TaggedFrame::deserialize(value.clone()) {
            Ok(TaggedFrame::Snapshot { data }) => {
                // A snapshot envelope wraps a single inner frame. One level only.
                if unwrapped {
                    trace!("dropping nested snapshot envelope");
                    Decoded::Ignored
                } else {
                    self.classify(data, received_at, true)
                }
            }
            Ok(TaggedFrame::Error(frame)) => Decoded::ServerError(ErrorNotice {
                message: frame.message,
                timestamp: frame.timestamp,
            }),
            Ok(TaggedFrame::Hello) => Decoded::Handshake,
            Ok(TaggedFrame::Pressure(frame)) => self.finish_reading(frame, received_at),
            // No tag, or a tag we do not know: probe for a bare reading
            // object ({deviceId, pressure, timestamp} with no "type").
            Err(_) => match WireReading::deserialize(value) {
                Ok(frame) => self.finish_reading(frame, received_at),
                Err(_) => Decoded::Ignored,
            },
        }
    }

    fn finish_reading(&self, frame: WireReading, received_at: OffsetDateTime) -> Decoded {
        let Some(pressure) = frame.pressure else {
            trace!("dropping pressure frame without a numeric pressure");
            return Decoded::Ignored;
        };

        let device_id = frame.device_id.filter(|id| !id.is_empty());
        if self.require_device_id && device_id.is_none() {
            trace!("dropping reading without a deviceId on a multi-device stream");
            return Decoded::Ignored;
        }

        Decoded::Reading(Reading {
            device_id,
            timestamp: Timestamp::from_wire(frame.timestamp, received_at),
            pressure_raw: pressure,
            temp_or_status: frame.temp_or_status,
            battery_v: frame.battery_v,
            external_v: frame.external_v,
            gsm_pct: frame.gsm_pct,
            raw: frame.raw,
        })
    }
}

/// Tagged wire frames, keyed on the `type` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedFrame {
    Pressure(WireReading),
    Error(WireError),
    /// Greeting frames carry a `ts` and a `message`, neither of which the
    /// dashboard uses.
    Hello,
    Snapshot { data: Value },
}

#[derive(Debug, Deserialize)]
struct WireReading {
    #[serde(default, rename = "deviceId", alias = "device_id")]
    device_id: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    /// Strict: a non-numeric pressure fails the whole frame.
    #[serde(default, alias = "pressureRaw", alias = "pressure_raw")]
    pressure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    temp_or_status: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    battery_v: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    external_v: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    gsm_pct: Option<f64>,
    #[serde(default)]
    raw: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    timestamp: Option<String>,
}

/// Auxiliary fields are never validated: anything non-numeric decodes as
/// absent instead of failing the frame.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}
