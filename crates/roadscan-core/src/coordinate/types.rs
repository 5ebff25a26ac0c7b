//! Core types for GPS coordinate normalization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest valid latitude magnitude in degrees.
pub const LAT_MAX: f64 = 90.0;

/// Largest valid longitude magnitude in degrees.
pub const LON_MAX: f64 = 180.0;

/// Error types for coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// One of the rational components has a zero denominator.
    #[error("Zero denominator in GPS {0} component")]
    ZeroDenominator(DmsComponent),

    /// The converted value falls outside the valid range for its axis.
    #[error("Coordinate {value} is outside +/-{limit} degrees")]
    OutOfRange { value: f64, limit: f64 },

    /// The hemisphere reference is not one of N, S, E or W.
    #[error("Invalid hemisphere reference: {0:?}")]
    InvalidReference(String),

    /// The hemisphere reference belongs to the other axis (e.g. `E` on a latitude).
    #[error("Hemisphere {0} does not match the {1} axis")]
    AxisMismatch(Hemisphere, Axis),

    /// A GPS block carries a coordinate without its hemisphere reference.
    #[error("Missing hemisphere reference for {0}")]
    MissingReference(Axis),

    /// A GPS block carries only one of the two coordinates.
    #[error("Missing {0} in GPS block")]
    MissingCoordinate(Axis),
}

/// Component of a degree/minute/second triple, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DmsComponent {
    Degrees,
    Minutes,
    Seconds,
}

impl std::fmt::Display for DmsComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DmsComponent::Degrees => "degrees",
            DmsComponent::Minutes => "minutes",
            DmsComponent::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

/// Which axis a coordinate lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Maximum absolute value in degrees for this axis.
    pub fn limit(self) -> f64 {
        match self {
            Axis::Latitude => LAT_MAX,
            Axis::Longitude => LON_MAX,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// An unsigned EXIF rational (numerator / denominator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    /// Value as a float, or `None` when the denominator is zero.
    #[inline]
    pub fn to_f64(self) -> Option<f64> {
        if self.denom == 0 {
            None
        } else {
            Some(f64::from(self.num) / f64::from(self.denom))
        }
    }
}

impl From<(u32, u32)> for Rational {
    fn from((num, denom): (u32, u32)) -> Self {
        Self { num, denom }
    }
}

impl From<exif::Rational> for Rational {
    fn from(r: exif::Rational) -> Self {
        Self {
            num: r.num,
            denom: r.denom,
        }
    }
}

/// A degree/minute/second triple exactly as stored in an EXIF GPS tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGpsValue {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl RawGpsValue {
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Build from `((num, denom), (num, denom), (num, denom))` tuples.
    pub fn from_tuples(degrees: (u32, u32), minutes: (u32, u32), seconds: (u32, u32)) -> Self {
        Self::new(degrees.into(), minutes.into(), seconds.into())
    }

    /// Unsigned magnitude `deg + min/60 + sec/3600`.
    ///
    /// Fails on the first component with a zero denominator.
    pub fn magnitude(&self) -> Result<f64, ConversionError> {
        let degrees = self
            .degrees
            .to_f64()
            .ok_or(ConversionError::ZeroDenominator(DmsComponent::Degrees))?;
        let minutes = self
            .minutes
            .to_f64()
            .ok_or(ConversionError::ZeroDenominator(DmsComponent::Minutes))?;
        let seconds = self
            .seconds
            .to_f64()
            .ok_or(ConversionError::ZeroDenominator(DmsComponent::Seconds))?;

        Ok(degrees + minutes / 60.0 + seconds / 3600.0)
    }
}

/// Hemisphere reference from `GPSLatitudeRef` / `GPSLongitudeRef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse a reference character, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// The single-character EXIF form.
    pub fn as_char(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    /// South and West produce negative decimal degrees.
    #[inline]
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

impl std::str::FromStr for Hemisphere {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Hemisphere::from_char(c).ok_or_else(|| ConversionError::InvalidReference(s.into()))
            }
            _ => Err(ConversionError::InvalidReference(s.into())),
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A signed decimal-degree value with the reference it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Signed decimal degrees (negative for S/W).
    pub degrees: f64,
    /// Hemisphere reference used for the sign, if one was present.
    pub hemisphere: Option<Hemisphere>,
}
