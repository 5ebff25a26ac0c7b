//! Normalized per-image metadata records.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::codec::{
    decode_exif_block, resolve_timestamp, ContainerFormat, ExifFields, GpsFields, ImageContainer,
    Timestamp,
};
use crate::coordinate::{format_magnitude, resolve_axis, Axis, ConversionError, GeoCoordinate};
use crate::options::ExtractOptions;

/// Camera identification. Absent values stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub make: Option<String>,
    pub model: Option<String>,
    pub software: Option<String>,
}

impl CameraInfo {
    pub fn make_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.make.as_deref().unwrap_or(placeholder)
    }

    pub fn model_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.model.as_deref().unwrap_or(placeholder)
    }

    pub fn software_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.software.as_deref().unwrap_or(placeholder)
    }

    pub fn is_empty(&self) -> bool {
        self.make.is_none() && self.model.is_none() && self.software.is_none()
    }
}

/// A resolved GPS position. Both axes are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: GeoCoordinate,
    pub longitude: GeoCoordinate,
}

impl Location {
    /// Resolve a decoded GPS group.
    ///
    /// Returns `Ok(None)` when the group has no coordinates at all, and an
    /// error when it has some but they cannot be trusted.
    pub fn from_gps(gps: &GpsFields) -> Result<Option<Self>, ConversionError> {
        if gps.is_empty() {
            return Ok(None);
        }

        let lat = gps
            .latitude
            .as_ref()
            .ok_or(ConversionError::MissingCoordinate(Axis::Latitude))?;
        let lon = gps
            .longitude
            .as_ref()
            .ok_or(ConversionError::MissingCoordinate(Axis::Longitude))?;

        Ok(Some(Self {
            latitude: resolve_axis(Axis::Latitude, lat, gps.latitude_ref.as_deref())?,
            longitude: resolve_axis(Axis::Longitude, lon, gps.longitude_ref.as_deref())?,
        }))
    }

    /// Latitude in `"deg;min;sec"` storage form (sign not included).
    pub fn latitude_sexagesimal(&self) -> String {
        format_magnitude(self.latitude.degrees)
    }

    /// Longitude in `"deg;min;sec"` storage form (sign not included).
    pub fn longitude_sexagesimal(&self) -> String {
        format_magnitude(self.longitude.degrees)
    }
}

/// Metadata for one uploaded image.
///
/// Built once per image and never modified. Optional fields are `None`
/// when the image does not carry them; callers must not treat a missing
/// location as `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadataRecord {
    pub filename: String,
    /// Lower-cased file extension from the filename, if any.
    pub extension: Option<String>,
    /// Container format detected from the file contents.
    pub format: ContainerFormat,
    pub width: u32,
    pub height: u32,
    /// Size of the uploaded file in bytes.
    pub byte_size: u64,
    /// `DateTimeOriginal`, or the fallback time.
    pub captured_at: Timestamp,
    /// `DateTime` (last modified), or the fallback time.
    pub modified_at: Timestamp,
    pub location: Option<Location>,
    pub camera: CameraInfo,
}

impl ImageMetadataRecord {
    /// Build a record from an already-read container.
    ///
    /// Per-field problems (bad timestamps, malformed GPS) never fail the
    /// record; the affected fields fall back or stay absent.
    pub fn assemble(
        container: ImageContainer,
        filename: &str,
        byte_size: u64,
        fallback: DateTime<Utc>,
    ) -> Self {
        let fields = container
            .exif
            .map(decode_exif_block)
            .unwrap_or_default();

        let location = resolve_location(filename, &fields);

        Self {
            filename: filename.to_string(),
            extension: file_extension(filename),
            format: container.format,
            width: container.width,
            height: container.height,
            byte_size,
            captured_at: resolve_timestamp(fields.date_time_original.as_deref(), fallback),
            modified_at: resolve_timestamp(fields.date_time.as_deref(), fallback),
            location,
            camera: CameraInfo {
                make: fields.make,
                model: fields.model,
                software: fields.software,
            },
        }
    }

    pub fn latitude(&self) -> Option<f64> {
        self.location.map(|l| l.latitude.degrees)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.location.map(|l| l.longitude.degrees)
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    /// Flatten into a display row, substituting the placeholder for absent camera fields.
    pub fn to_row(&self, options: &ExtractOptions) -> RecordRow {
        let placeholder = options.camera_placeholder.as_str();
        RecordRow {
            file_name: self.filename.clone(),
            width: self.width,
            height: self.height,
            date_time: self.captured_at.to_rfc3339(),
            date_time_is_exif: self.captured_at.is_from_exif(),
            make: self.camera.make_or(placeholder).to_string(),
            model: self.camera.model_or(placeholder).to_string(),
            software: self.camera.software_or(placeholder).to_string(),
            latitude: self.latitude(),
            longitude: self.longitude(),
        }
    }
}

/// Flat row for tables and CSV-style exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordRow {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub date_time: String,
    /// False when `date_time` is the processing-time fallback.
    pub date_time_is_exif: bool,
    pub make: String,
    pub model: String,
    pub software: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RecordRow {
    /// Column names in serialization order.
    pub const COLUMNS: [&'static str; 10] = [
        "FileName",
        "Width",
        "Height",
        "DateTime",
        "DateTimeIsExif",
        "Make",
        "Model",
        "Software",
        "Latitude",
        "Longitude",
    ];
}

fn resolve_location(filename: &str, fields: &ExifFields) -> Option<Location> {
    let gps = fields.gps.as_ref()?;
    match Location::from_gps(gps) {
        Ok(location) => location,
        Err(e) => {
            warn!("{}: ignoring malformed GPS block: {}", filename, e);
            None
        }
    }
}

/// Lower-cased extension of a filename, without the dot.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}
