//! Map plotting data for located records.

use serde::{Deserialize, Serialize};

use crate::record::ImageMetadataRecord;

/// Zoom level when a single photo is plotted.
pub const SINGLE_POINT_ZOOM: u8 = 12;

/// Zoom level when several photos are plotted.
pub const MULTI_POINT_ZOOM: u8 = 6;

/// One plotted photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub filename: String,
    pub latitude: f64,
    pub longitude: f64,
    pub make: Option<String>,
    pub model: Option<String>,
}

/// Points plus an initial view centered on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
    pub points: Vec<MapPoint>,
}

impl MapView {
    /// Build a view from the records that have a location.
    ///
    /// Returns `None` when no record is located. Records without a location
    /// are skipped, never plotted at `(0, 0)`.
    pub fn from_records(records: &[ImageMetadataRecord]) -> Option<Self> {
        let points: Vec<MapPoint> = records
            .iter()
            .filter_map(|record| {
                let location = record.location?;
                Some(MapPoint {
                    filename: record.filename.clone(),
                    latitude: location.latitude.degrees,
                    longitude: location.longitude.degrees,
                    make: record.camera.make.clone(),
                    model: record.camera.model.clone(),
                })
            })
            .collect();

        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let center_latitude = points.iter().map(|p| p.latitude).sum::<f64>() / n;
        let center_longitude = points.iter().map(|p| p.longitude).sum::<f64>() / n;
        let zoom = if points.len() > 1 {
            MULTI_POINT_ZOOM
        } else {
            SINGLE_POINT_ZOOM
        };

        Some(Self {
            center_latitude,
            center_longitude,
            zoom,
            points,
        })
    }
}
