//! Metadata extraction bindings.

use roadscan_core::{
    process_batch, BatchReport, ExtractOptions, ImageMetadataRecord, MapView, RecordRow,
    ReportError, REPORT_FILENAME,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{
    extraction_error, fallback_from_millis, options_from_js, to_js, uploads_from_js, JsFailure,
};

/// Extract metadata from a single image.
///
/// # Arguments
/// * `bytes` - Raw file contents
/// * `filename` - Original file name, used for the record and its extension
/// * `fallback_ms` - Epoch milliseconds for timestamps the image lacks
///   (defaults to `Date.now()`)
///
/// # Returns
/// The metadata record as a plain object.
///
/// # Errors
/// Returns an error string if the file is empty, not an image, or corrupted.
#[wasm_bindgen]
pub fn extract_metadata(
    bytes: &[u8],
    filename: &str,
    fallback_ms: Option<f64>,
) -> Result<JsValue, JsValue> {
    let fallback = fallback_from_millis(fallback_ms).map_err(|e| JsValue::from_str(&e))?;
    let record =
        roadscan_core::extract_metadata(bytes, filename, fallback).map_err(extraction_error)?;
    to_js(&record)
}

/// Extract metadata from a list of `{ name, bytes }` entries.
///
/// Files that fail are reported in `failures` and do not stop the rest.
/// The result also carries display rows, a summary line, a CSV report
/// (`csv`, with `csv_filename` for downloads) and, when any photo is
/// located, the map view.
#[wasm_bindgen]
pub fn extract_batch(
    files: js_sys::Array,
    fallback_ms: Option<f64>,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let fallback = fallback_from_millis(fallback_ms).map_err(|e| JsValue::from_str(&e))?;
    let uploads = uploads_from_js(&files)?;

    let report = process_batch(&uploads, fallback, &options);
    let output =
        BatchOutput::new(&report, &options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&output)
}

/// Build the map view for records previously returned by `extract_*`.
///
/// Returns `null` when no record has a location.
#[wasm_bindgen]
pub fn summarize_map(records: JsValue) -> Result<JsValue, JsValue> {
    let records: Vec<ImageMetadataRecord> =
        serde_wasm_bindgen::from_value(records).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&MapView::from_records(&records))
}

#[derive(Debug, Serialize)]
struct BatchOutput {
    records: Vec<ImageMetadataRecord>,
    rows: Vec<RecordRow>,
    failures: Vec<JsFailure>,
    summary: String,
    map: Option<MapView>,
    csv: String,
    csv_filename: &'static str,
}

impl BatchOutput {
    fn new(report: &BatchReport, options: &ExtractOptions) -> Result<Self, ReportError> {
        Ok(Self {
            records: report.records.clone(),
            rows: report.records.iter().map(|r| r.to_row(options)).collect(),
            failures: report.failures.iter().map(JsFailure::from).collect(),
            summary: report.summary(),
            map: MapView::from_records(&report.records),
            csv: report.to_csv(options)?,
            csv_filename: REPORT_FILENAME,
        })
    }
}
