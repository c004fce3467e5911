//! Deterministic per-device chart colors.
//!
//! Colors are derived from a hash of the device id, so the same device gets
//! the same color in every session and every process. Hue varies per device;
//! saturation and lightness are fixed for legible lines on a light chart
//! background.

use serde::Serialize;

use crate::store::DeviceSet;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const SATURATION: f64 = 0.65;
const LIGHTNESS: f64 = 0.50;

/// A display color assigned to one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceColor {
    /// Hue in degrees, `0..360`.
    pub hue: u16,
    /// CSS-style `#rrggbb` value at the fixed saturation/lightness.
    pub hex: String,
}

/// Color for a single device id.
#[must_use]
pub fn color_for(device_id: &str) -> DeviceColor {
    let hue = (fnv1a(device_id.as_bytes()) % 360) as u16;
    let (r, g, b) = hsl_to_rgb(f64::from(hue), SATURATION, LIGHTNESS);
    DeviceColor {
        hue,
        hex: format!("#{r:02x}{g:02x}{b:02x}"),
    }
}

/// Colors for every device in a set, in configured order.
#[must_use]
pub fn assign_colors(devices: &DeviceSet) -> Vec<(String, DeviceColor)> {
    devices
        .iter()
        .map(|id| (id.to_string(), color_for(id)))
        .collect()
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match hue as u32 {
        0..60 => (c, x, 0.0),
        60..120 => (x, c, 0.0),
        120..180 => (0.0, c, x),
        180..240 => (0.0, x, c),
        240..300 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
