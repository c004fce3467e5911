//! Text formatting for readings and values.

use barograph_types::Reading;

/// Placeholder for auxiliary values the sender did not supply.
const UNKNOWN: &str = "unknown";

/// Format one reading as a single display line.
///
/// Auxiliary fields the sender omitted render as "unknown".
pub fn format_reading(reading: &Reading, offset: f64) -> String {
    let device = reading.device_id.as_deref().unwrap_or("-");
    format!(
        "{}  {}  pressure {:.2}  cal {:.2}  temp {}  batt {}  ext {}  gsm {}",
        reading.timestamp.label(),
        device,
        reading.pressure_raw,
        reading.calibrated(offset),
        opt_value(reading.temp_or_status),
        opt_value(reading.battery_v),
        opt_value(reading.external_v),
        opt_value(reading.gsm_pct),
    )
}

fn opt_value(value: Option<f64>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |v| format!("{v:.2}"))
}
