//! Platform-agnostic types for barograph pressure dashboards.
//!
//! This crate provides the shared data model and the wire decoder used by
//! every dashboard surface: the [`Reading`] type, its timestamp handling,
//! and the total-function classification of inbound JSON text frames.
//!
//! # Features
//!
//! - Core data types for sensor readings
//! - Builder with optional validation
//! - Wire-frame classification that never fails on malformed input
//!
//! # Example
//!
//! ```
//! use barograph_types::{Decoded, Decoder};
//! use time::OffsetDateTime;
//!
//! let decoder = Decoder::single_device();
//! let now = OffsetDateTime::now_utc();
//!
//! let decoded = decoder.decode(r#"{"type":"pressure","pressure":1013.2}"#, now);
//! assert!(matches!(decoded, Decoded::Reading(_)));
//!
//! // Garbage is a no-op, not an error.
//! assert_eq!(decoder.decode("not json at all", now), Decoded::Ignored);
//! ```

pub mod error;
pub mod reading;
pub mod wire;

pub use error::{ParseError, ParseResult};
pub use reading::{Reading, ReadingBuilder, Timestamp};
pub use wire::{Decoded, Decoder, ErrorNotice};

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use time::macros::datetime;

    fn at() -> OffsetDateTime {
        datetime!(2024-06-01 12:00:00 UTC)
    }

    // --- Decoder classification tests ---

    #[test]
    fn test_decode_pressure_frame_full() {
        let payload = r#"{
            "type": "pressure",
            "timestamp": "2024-06-01T11:59:30Z",
            "pressure": 1013.2,
            "temp_or_status": 21.5,
            "battery_v": 3.71,
            "external_v": null,
            "gsm_pct": 82
        }"#;

        let decoded = Decoder::single_device().decode(payload, at());
        let Decoded::Reading(reading) = decoded else {
            panic!("expected a reading, got {decoded:?}");
        };

        assert!((reading.pressure_raw - 1013.2).abs() < 1e-9);
        assert_eq!(reading.temp_or_status, Some(21.5));
        assert_eq!(reading.battery_v, Some(3.71));
        assert_eq!(reading.external_v, None);
        assert_eq!(reading.gsm_pct, Some(82.0));
        assert_eq!(
            reading.timestamp.original.as_deref(),
            Some("2024-06-01T11:59:30Z")
        );
        // Parsed timestamp, not receipt time.
        assert_ne!(reading.timestamp.epoch_ms(), at().unix_timestamp() * 1000);
    }

    #[test]
    fn test_decode_missing_pressure_is_ignored() {
        let payload = r#"{"type": "pressure", "timestamp": "2024-06-01T11:59:30Z"}"#;
        let decoded = Decoder::single_device().decode(payload, at());
        assert_eq!(decoded, Decoded::Ignored);
    }

    #[test]
    fn test_decode_non_numeric_pressure_is_ignored() {
        let payload = r#"{"type": "pressure", "pressure": "high"}"#;
        let decoded = Decoder::single_device().decode(payload, at());
        assert_eq!(decoded, Decoded::Ignored);
    }

    #[test]
    fn test_decode_garbage_is_ignored() {
        let decoder = Decoder::single_device();
        assert_eq!(decoder.decode("", at()), Decoded::Ignored);
        assert_eq!(decoder.decode("not json at all", at()), Decoded::Ignored);
        assert_eq!(decoder.decode("{truncated", at()), Decoded::Ignored);
        assert_eq!(decoder.decode("42", at()), Decoded::Ignored);
        assert_eq!(decoder.decode("[1, 2, 3]", at()), Decoded::Ignored);
        assert_eq!(decoder.decode("null", at()), Decoded::Ignored);
    }

    #[test]
    fn test_decode_unrelated_object_is_ignored() {
        let payload = r#"{"unrelated": true, "fields": ["a", "b"]}"#;
        assert_eq!(
            Decoder::single_device().decode(payload, at()),
            Decoded::Ignored
        );
    }

    #[test]
    fn test_decode_error_frame() {
        let payload = r#"{
            "type": "error",
            "timestamp": "2024-06-01T12:00:00Z",
            "message": "sensor offline"
        }"#;

        let decoded = Decoder::single_device().decode(payload, at());
        let Decoded::ServerError(notice) = decoded else {
            panic!("expected a server error, got {decoded:?}");
        };
        assert_eq!(notice.message, "sensor offline");
        assert_eq!(notice.timestamp.as_deref(), Some("2024-06-01T12:00:00Z"));
    }

    #[test]
    fn test_decode_hello_frame_is_handshake() {
        let payload = r#"{"type": "hello", "ts": "2024-06-01T12:00:00Z", "message": "welcome"}"#;
        assert_eq!(
            Decoder::single_device().decode(payload, at()),
            Decoded::Handshake
        );
    }

    #[test]
    fn test_decode_snapshot_unwraps_pressure() {
        let payload = r#"{
            "type": "snapshot",
            "data": {"type": "pressure", "pressure": 998.4, "deviceId": "well-3"}
        }"#;

        let decoded = Decoder::multi_device().decode(payload, at());
        let Decoded::Reading(reading) = decoded else {
            panic!("expected a reading, got {decoded:?}");
        };
        assert_eq!(reading.device_id.as_deref(), Some("well-3"));
        assert!((reading.pressure_raw - 998.4).abs() < 1e-9);
    }

    #[test]
    fn test_decode_snapshot_unwraps_error() {
        let payload = r#"{"type": "snapshot", "data": {"type": "error", "message": "boom"}}"#;
        let decoded = Decoder::single_device().decode(payload, at());
        assert!(matches!(decoded, Decoded::ServerError(n) if n.message == "boom"));
    }

    #[test]
    fn test_decode_snapshot_without_data_is_ignored() {
        let payload = r#"{"type": "snapshot"}"#;
        assert_eq!(
            Decoder::single_device().decode(payload, at()),
            Decoded::Ignored
        );
    }

    #[test]
    fn test_decode_nested_snapshot_is_ignored() {
        let payload = r#"{
            "type": "snapshot",
            "data": {"type": "snapshot", "data": {"type": "pressure", "pressure": 1.0}}
        }"#;
        assert_eq!(
            Decoder::single_device().decode(payload, at()),
            Decoded::Ignored
        );
    }

    #[test]
    fn test_multi_device_requires_device_id() {
        let decoder = Decoder::multi_device();

        let missing = r#"{"type": "pressure", "pressure": 1000.0}"#;
        assert_eq!(decoder.decode(missing, at()), Decoded::Ignored);

        let empty = r#"{"type": "pressure", "pressure": 1000.0, "deviceId": ""}"#;
        assert_eq!(decoder.decode(empty, at()), Decoded::Ignored);

        let present = r#"{"type": "pressure", "pressure": 1000.0, "deviceId": "a"}"#;
        assert!(matches!(decoder.decode(present, at()), Decoded::Reading(_)));
    }

    #[test]
    fn test_single_device_ignores_device_id_requirement() {
        let payload = r#"{"type": "pressure", "pressure": 1000.0}"#;
        assert!(matches!(
            Decoder::single_device().decode(payload, at()),
            Decoded::Reading(_)
        ));
    }

    #[test]
    fn test_bare_object_without_type_decodes() {
        // Multi-device senders may omit "type" entirely.
        let payload = r#"{"deviceId": "pump-1", "pressure": 955.0, "timestamp": "2024-06-01T11:00:00Z"}"#;
        let decoded = Decoder::multi_device().decode(payload, at());
        let Decoded::Reading(reading) = decoded else {
            panic!("expected a reading, got {decoded:?}");
        };
        assert_eq!(reading.device_id.as_deref(), Some("pump-1"));
    }

    #[test]
    fn test_unknown_type_with_pressure_decodes_as_reading() {
        let payload = r#"{"type": "telemetry", "pressure": 1001.0}"#;
        assert!(matches!(
            Decoder::single_device().decode(payload, at()),
            Decoded::Reading(_)
        ));
    }

    #[test]
    fn test_bad_timestamp_defaults_to_receipt_time() {
        let payload = r#"{"type": "pressure", "pressure": 1000.0, "timestamp": "yesterday-ish"}"#;
        let decoded = Decoder::single_device().decode(payload, at());
        let Decoded::Reading(reading) = decoded else {
            panic!("expected a reading, got {decoded:?}");
        };
        assert_eq!(reading.timestamp.instant, at());
        // The sender's string is still preserved for display.
        assert_eq!(reading.timestamp.original.as_deref(), Some("yesterday-ish"));
    }

    #[test]
    fn test_missing_timestamp_defaults_to_receipt_time() {
        let payload = r#"{"type": "pressure", "pressure": 1000.0}"#;
        let decoded = Decoder::single_device().decode(payload, at());
        let Decoded::Reading(reading) = decoded else {
            panic!("expected a reading, got {decoded:?}");
        };
        assert_eq!(reading.timestamp.instant, at());
        assert_eq!(reading.timestamp.original, None);
    }

    #[test]
    fn test_non_numeric_auxiliary_fields_decode_as_absent() {
        let payload = r#"{
            "type": "pressure",
            "pressure": 1000.0,
            "temp_or_status": "ERR",
            "battery_v": 3.7
        }"#;
        let decoded = Decoder::single_device().decode(payload, at());
        let Decoded::Reading(reading) = decoded else {
            panic!("expected a reading, got {decoded:?}");
        };
        assert_eq!(reading.temp_or_status, None);
        assert_eq!(reading.battery_v, Some(3.7));
    }

    #[test]
    fn test_pressure_raw_alias() {
        let payload = r#"{"type": "pressure", "pressureRaw": 987.6}"#;
        let decoded = Decoder::single_device().decode(payload, at());
        let Decoded::Reading(reading) = decoded else {
            panic!("expected a reading, got {decoded:?}");
        };
        assert!((reading.pressure_raw - 987.6).abs() < 1e-9);
    }

    // --- Timestamp tests ---

    #[test]
    fn test_timestamp_epoch_ms() {
        let ts = Timestamp::from_instant(at());
        assert_eq!(ts.epoch_ms(), at().unix_timestamp() * 1000);
    }

    #[test]
    fn test_timestamp_label() {
        let ts = Timestamp::from_instant(datetime!(2024-06-01 09:05:03 UTC));
        assert_eq!(ts.label(), "09:05:03");
    }

    #[test]
    fn test_timestamp_from_wire_parses_rfc3339() {
        let ts = Timestamp::from_wire(Some("2024-06-01T11:30:00Z".to_string()), at());
        assert_eq!(ts.instant, datetime!(2024-06-01 11:30:00 UTC));
        assert_eq!(ts.original.as_deref(), Some("2024-06-01T11:30:00Z"));
    }

    // --- Reading tests ---

    #[test]
    fn test_reading_calibrated() {
        let reading = Reading::builder().pressure_raw(5.0).build();
        assert_eq!(reading.calibrated(0.0), 5.0);
        assert_eq!(reading.calibrated(2.0), 7.0);
        assert_eq!(reading.calibrated(-1.5), 3.5);
        // Raw value untouched by calibration reads.
        assert_eq!(reading.pressure_raw, 5.0);
    }

    #[test]
    fn test_reading_builder() {
        let reading = Reading::builder()
            .device_id("well-3")
            .pressure_raw(1013.2)
            .battery_v(3.7)
            .raw("0x5A")
            .build();

        assert_eq!(reading.device_id.as_deref(), Some("well-3"));
        assert_eq!(reading.battery_v, Some(3.7));
        assert_eq!(reading.raw.as_deref(), Some("0x5A"));
        assert_eq!(reading.temp_or_status, None);
    }

    #[test]
    fn test_reading_try_build_rejects_non_finite_pressure() {
        let result = Reading::builder().pressure_raw(f64::NAN).try_build();
        assert!(matches!(result, Err(ParseError::InvalidValue(_))));

        let result = Reading::builder().pressure_raw(f64::INFINITY).try_build();
        assert!(result.is_err());

        let result = Reading::builder().pressure_raw(1013.2).try_build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_reading_serialization_roundtrip() {
        let reading = Reading::builder()
            .device_id("well-3")
            .timestamp(Timestamp::from_wire(
                Some("2024-06-01T11:30:00Z".to_string()),
                at(),
            ))
            .pressure_raw(1013.2)
            .gsm_pct(82.0)
            .build();

        let json = serde_json::to_string(&reading).unwrap();
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    // --- ParseError tests ---

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::InvalidValue("test message".to_string());
        assert_eq!(err.to_string(), "Invalid value: test message");
    }

    // --- Total-function property ---

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// For all strings the decoder classifies without panicking.
            #[test]
            fn decode_is_total(payload in ".*") {
                let _ = Decoder::single_device().decode(&payload, at());
                let _ = Decoder::multi_device().decode(&payload, at());
            }

            /// Valid JSON of unrelated shape is always a no-op.
            #[test]
            fn unrelated_json_is_ignored(n in any::<i64>()) {
                let payload = format!(r#"{{"count": {n}}}"#);
                prop_assert_eq!(
                    Decoder::single_device().decode(&payload, at()),
                    Decoded::Ignored
                );
            }
        }
    }
}
