//! Byte-size strings (`"50 MB"`, `"512M"`, `"1 GB"`).

use regex::Regex;
use std::sync::LazyLock;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

static SIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(-?[0-9]*\.?[0-9]+)\s*([a-z]*)\s*$").expect("SIZE_REGEX must compile")
});

/// Parse a byte-size string into a byte count.
///
/// Accepts a decimal number followed by an optional unit (`b`, `k`/`kb`,
/// `m`/`mb`, `g`/`gb`, any case). Returns `None` for anything else.
pub fn parse_bytes(s: &str) -> Option<f64> {
    let caps = SIZE_REGEX.captures(s)?;
    let number: f64 = caps[1].parse().ok()?;
    let multiplier = match caps[2].to_ascii_lowercase().as_str() {
        "" | "b" => 1.0,
        "k" | "kb" => KIB,
        "m" | "mb" => MIB,
        "g" | "gb" => GIB,
        _ => return None,
    };
    Some(number * multiplier)
}

/// Render a byte count in the largest unit it reaches.
///
/// Whole numbers from ten units up, two decimals below that.
pub fn show_bytes(bytes: f64) -> String {
    let scaled = |value: f64, unit: &str| {
        if value >= 10.0 {
            format!("{} {}", value as i64, unit)
        } else {
            format!("{:.2} {}", value, unit)
        }
    };

    if bytes >= GIB {
        scaled(bytes / GIB, "GB")
    } else if bytes >= MIB {
        scaled(bytes / MIB, "MB")
    } else if bytes >= KIB {
        scaled(bytes / KIB, "KB")
    } else {
        format!("{} B", bytes as i64)
    }
}
