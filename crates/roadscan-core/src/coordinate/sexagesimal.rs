//! Compact `"deg;min;sec"` storage form for GPS coordinates.
//!
//! The string carries magnitude only. The hemisphere has to be stored
//! alongside it by the caller.

use super::{ConversionError, RawGpsValue};

const SEPARATOR: char = ';';

/// Render a raw GPS triple as `"<deg>;<min>;<sec>"`.
///
/// Degrees and minutes are truncated, seconds are rounded to 3 decimals.
/// Truncation is applied to the decimal magnitude, so fractional raw minutes
/// (e.g. `2655/100`) carry into the seconds field instead of being dropped.
pub fn to_sexagesimal_string(raw: &RawGpsValue) -> Result<String, ConversionError> {
    Ok(format_magnitude(raw.magnitude()?))
}

/// Render an unsigned decimal-degree magnitude in the storage form.
pub(crate) fn format_magnitude(magnitude: f64) -> String {
    let magnitude = magnitude.abs();
    let degrees = magnitude.trunc();
    let minutes_total = (magnitude - degrees) * 60.0;
    let minutes = minutes_total.trunc();
    let seconds = (minutes_total - minutes) * 60.0;

    format!(
        "{}{SEPARATOR}{}{SEPARATOR}{:.3}",
        degrees as u64, minutes as u64, seconds
    )
}

/// Parse the storage form back into unsigned decimal degrees.
///
/// Returns `None` unless the input has exactly three fields written in plain
/// decimal notation (digits and an optional point; no sign or exponent).
pub fn from_sexagesimal_string(s: &str) -> Option<f64> {
    let mut fields = s.split(SEPARATOR).map(parse_field);

    let degrees = fields.next()??;
    let minutes = fields.next()??;
    let seconds = fields.next()??;
    if fields.next().is_some() {
        return None;
    }

    Some(degrees + minutes / 60.0 + seconds / 3600.0)
}

fn parse_field(field: &str) -> Option<f64> {
    let field = field.trim();
    if !field.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    let value: f64 = field.parse().ok()?;
    value.is_finite().then_some(value)
}
