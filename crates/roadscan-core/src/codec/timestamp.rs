//! EXIF timestamp parsing with explicit fallback provenance.

use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Fixed EXIF date format: `YYYY:MM:DD HH:MM:SS`.
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

const EXIF_DATETIME_LEN: usize = 19;

/// Where a record timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSource {
    /// Parsed from the image's EXIF block.
    Exif,
    /// The caller's processing time, used because EXIF had no usable value.
    Fallback,
}

/// A record timestamp tagged with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub value: DateTime<Utc>,
    pub source: TimestampSource,
}

impl Timestamp {
    pub fn from_exif(value: DateTime<Utc>) -> Self {
        Self {
            value,
            source: TimestampSource::Exif,
        }
    }

    pub fn fallback(value: DateTime<Utc>) -> Self {
        Self {
            value,
            source: TimestampSource::Fallback,
        }
    }

    /// True when the value came from the camera rather than the fallback.
    #[inline]
    pub fn is_from_exif(&self) -> bool {
        self.source == TimestampSource::Exif
    }

    /// ISO 8601 form, e.g. `2023-07-15T14:22:05+00:00`.
    pub fn to_rfc3339(&self) -> String {
        self.value.to_rfc3339()
    }
}

/// Parse an EXIF date string. EXIF carries no zone, so the value is taken as UTC.
///
/// Returns `None` for anything that is not a real calendar date in the
/// EXIF format, including the `0000:00:00 00:00:00` placeholder.
pub fn parse_exif_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    if !has_exif_layout(trimmed) {
        return None;
    }
    NaiveDateTime::parse_from_str(trimmed, EXIF_DATETIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Zero-padded fields with separators at fixed positions.
/// chrono alone would also accept `2023:7:5 4:2:5`.
fn has_exif_layout(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == EXIF_DATETIME_LEN
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 | 13 | 16 => b == b':',
            10 => b == b' ',
            _ => b.is_ascii_digit(),
        })
}

/// Resolve one timestamp field, falling back per field when absent or malformed.
pub fn resolve_timestamp(raw: Option<&str>, fallback: DateTime<Utc>) -> Timestamp {
    match raw {
        Some(value) => match parse_exif_datetime(value) {
            Some(parsed) => Timestamp::from_exif(parsed),
            None => {
                debug!("Unparseable EXIF timestamp {:?}, using fallback", value);
                Timestamp::fallback(fallback)
            }
        },
        None => Timestamp::fallback(fallback),
    }
}
