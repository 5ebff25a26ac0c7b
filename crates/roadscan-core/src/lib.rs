//! Roadscan Core - photo metadata extraction library
//!
//! This crate turns uploaded photographs into normalized metadata records:
//! pixel dimensions, camera fields, capture/modified timestamps and GPS
//! location as signed decimal degrees. It works on in-memory bytes only and
//! holds no state between calls, so callers are free to process images in
//! any order or in parallel.
//!
//! # Module Structure
//!
//! - `codec` - Container reading and EXIF decoding
//! - `coordinate` - GPS degree/minute/second normalization
//! - `record` - The per-image output record
//! - `batch` - Processing a list of uploads with per-file failures
//! - `map` - Plotting data for located records
//! - `options` - Caller-tunable options
//! - `report` - CSV export of record rows

pub mod batch;
pub mod codec;
pub mod coordinate;
pub mod map;
pub mod options;
pub mod record;
pub mod report;

#[cfg(test)]
pub(crate) mod test_fixtures;

use chrono::{DateTime, Utc};

pub use batch::{process_batch, BatchReport, ImageFailure, ImageUpload};
pub use codec::{ExtractionError, Timestamp, TimestampSource};
pub use coordinate::{
    from_sexagesimal_string, to_decimal, to_sexagesimal_string, ConversionError, GeoCoordinate,
    Hemisphere, RawGpsValue,
};
pub use map::{MapPoint, MapView};
pub use options::ExtractOptions;
pub use record::{CameraInfo, ImageMetadataRecord, Location, RecordRow};
pub use report::{to_csv, ReportError, REPORT_FILENAME};

/// Extract a normalized metadata record from image bytes.
///
/// `fallback` is used for any timestamp the image does not provide; the
/// record marks such timestamps as [`TimestampSource::Fallback`].
///
/// # Errors
///
/// Returns an `ExtractionError` only when the container itself cannot be
/// read. Missing EXIF, malformed GPS and bad timestamps are not errors.
pub fn extract_metadata(
    bytes: &[u8],
    filename: &str,
    fallback: DateTime<Utc>,
) -> Result<ImageMetadataRecord, ExtractionError> {
    let container = codec::read_container(bytes)?;
    Ok(ImageMetadataRecord::assemble(
        container,
        filename,
        bytes.len() as u64,
        fallback,
    ))
}

/// Convert a raw EXIF GPS triple to signed decimal degrees.
///
/// `S` and `W` give negative values; `N`, `E` or no reference give positive ones.
pub fn convert_coordinate(
    raw: &RawGpsValue,
    reference: Option<Hemisphere>,
) -> Result<f64, ConversionError> {
    coordinate::to_decimal(raw, reference).map(|c| c.degrees)
}
