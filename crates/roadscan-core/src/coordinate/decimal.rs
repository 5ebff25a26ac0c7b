//! Degree/minute/second to signed decimal degree conversion.

use super::{Axis, ConversionError, GeoCoordinate, Hemisphere, RawGpsValue};

/// Convert a raw EXIF GPS triple to signed decimal degrees.
///
/// The magnitude is `deg + min/60 + sec/3600`. The result is negated for
/// `S` and `W`, and left positive for `N`, `E` or a missing reference.
///
/// # Errors
///
/// - `ConversionError::ZeroDenominator` if any component divides by zero
/// - `ConversionError::OutOfRange` if the magnitude exceeds 90 degrees for a
///   latitude reference, or 180 degrees otherwise
pub fn to_decimal(
    raw: &RawGpsValue,
    hemisphere: Option<Hemisphere>,
) -> Result<GeoCoordinate, ConversionError> {
    let magnitude = raw.magnitude()?;

    let limit = hemisphere.map_or(Axis::Longitude, Hemisphere::axis).limit();
    if !magnitude.is_finite() || magnitude > limit {
        return Err(ConversionError::OutOfRange {
            value: magnitude,
            limit,
        });
    }

    let degrees = match hemisphere {
        Some(h) if h.is_negative() => -magnitude,
        _ => magnitude,
    };

    Ok(GeoCoordinate {
        degrees,
        hemisphere,
    })
}

/// Resolve one axis of an EXIF GPS block.
///
/// Unlike [`to_decimal`], a GPS block must carry a reference that matches
/// the axis being read; anything else is treated as malformed.
pub fn resolve_axis(
    axis: Axis,
    raw: &RawGpsValue,
    reference: Option<&str>,
) -> Result<GeoCoordinate, ConversionError> {
    let hemisphere: Hemisphere = reference
        .ok_or(ConversionError::MissingReference(axis))?
        .parse()?;

    if hemisphere.axis() != axis {
        return Err(ConversionError::AxisMismatch(hemisphere, axis));
    }

    to_decimal(raw, Some(hemisphere))
}
