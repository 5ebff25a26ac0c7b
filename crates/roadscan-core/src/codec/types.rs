//! Core types for metadata extraction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinate::RawGpsValue;

/// Error types for metadata extraction.
///
/// Every variant is scoped to a single image. Batch callers record it and
/// move on to the next file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// No bytes were supplied.
    #[error("Empty image data")]
    EmptyInput,

    /// The bytes do not start with a recognized container signature.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The container was recognized but its header could not be read.
    #[error("Corrupted or incomplete image file: {0}")]
    ContainerDecode(String),
}

/// Image container formats recognized from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerFormat {
    Jpeg,
    Png,
    /// HEIF family (HEIC, HEIF), ISO base media file format.
    Heif,
}

impl ContainerFormat {
    /// Short display name.
    pub fn as_str(self) -> &'static str {
        match self {
            ContainerFormat::Jpeg => "JPEG",
            ContainerFormat::Png => "PNG",
            ContainerFormat::Heif => "HEIC",
        }
    }
}

/// What the container step hands to the EXIF decoder.
///
/// Callers that already decoded the container themselves can build this
/// directly and skip [`super::read_container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContainer {
    pub format: ContainerFormat,
    /// Pixel width from the container header.
    pub width: u32,
    /// Pixel height from the container header.
    pub height: u32,
    /// Raw EXIF block (TIFF header onwards), if the container embeds one.
    pub exif: Option<Vec<u8>>,
}

/// Logical EXIF tag groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExifGroup {
    /// Primary image tags (IFD0): Make, Model, Software, DateTime.
    Zeroth,
    /// Capture tags from the Exif sub-IFD: DateTimeOriginal.
    Exif,
    /// Location tags from the GPS sub-IFD.
    Gps,
    /// Interoperability tags, not used for records.
    Interop,
}

/// Raw GPS tags as found in the GPS group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpsFields {
    pub latitude: Option<RawGpsValue>,
    pub latitude_ref: Option<String>,
    pub longitude: Option<RawGpsValue>,
    pub longitude_ref: Option<String>,
}

impl GpsFields {
    /// True when neither coordinate tag is present.
    pub fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none()
    }
}

/// Fields decoded from an EXIF block. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExifFields {
    /// `DateTimeOriginal` as stored (`YYYY:MM:DD HH:MM:SS`).
    pub date_time_original: Option<String>,
    /// `DateTime` (file modified) as stored.
    pub date_time: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub software: Option<String>,
    /// GPS group, if the block has one.
    pub gps: Option<GpsFields>,
}

impl ExifFields {
    /// True when nothing usable was decoded.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
