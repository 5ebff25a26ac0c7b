//! Conversions between JavaScript values and core types.

use chrono::{DateTime, Utc};
use roadscan_core::codec::ExtractionError;
use roadscan_core::coordinate::{ConversionError, Hemisphere, RawGpsValue};
use roadscan_core::{ExtractOptions, ImageFailure, ImageUpload};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Raw GPS value as sent from JS: `[[num, den], [num, den], [num, den]]`.
pub(crate) type RawTriples = [(u32, u32); 3];

pub(crate) fn raw_from_triples([d, m, s]: RawTriples) -> RawGpsValue {
    RawGpsValue::from_tuples(d, m, s)
}

/// Parse an optional reference string; empty means "no reference".
pub(crate) fn hemisphere_from_js(
    reference: Option<&str>,
) -> Result<Option<Hemisphere>, ConversionError> {
    match reference.map(str::trim) {
        None | Some("") => Ok(None),
        Some(r) => r.parse().map(Some),
    }
}

/// Resolve the fallback timestamp: explicit epoch millis, or "now".
pub(crate) fn fallback_from_millis(millis: Option<f64>) -> Result<DateTime<Utc>, String> {
    let millis = millis.unwrap_or_else(js_sys::Date::now);
    if !millis.is_finite() {
        return Err(format!("Invalid fallback timestamp: {}", millis));
    }
    DateTime::from_timestamp_millis(millis as i64)
        .ok_or_else(|| format!("Fallback timestamp out of range: {}", millis))
}

/// Deserialize options, treating `undefined`/`null` as defaults.
pub(crate) fn options_from_js(options: JsValue) -> Result<ExtractOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ExtractOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read `[{ name, bytes }]` file entries from a JS array.
pub(crate) fn uploads_from_js(files: &js_sys::Array) -> Result<Vec<ImageUpload>, JsValue> {
    files
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let name = js_sys::Reflect::get(&entry, &JsValue::from_str("name"))?
                .as_string()
                .ok_or_else(|| JsValue::from_str(&format!("File entry {} has no name", i)))?;
            let bytes = js_sys::Reflect::get(&entry, &JsValue::from_str("bytes"))?;
            let bytes = js_sys::Uint8Array::new(&bytes).to_vec();
            Ok(ImageUpload::new(name, bytes))
        })
        .collect()
}

/// Failure entry as exposed to JS.
#[derive(Debug, Serialize)]
pub(crate) struct JsFailure {
    pub index: usize,
    pub filename: String,
    pub error: String,
}

impl From<&ImageFailure> for JsFailure {
    fn from(failure: &ImageFailure) -> Self {
        Self {
            index: failure.index,
            filename: failure.filename.clone(),
            error: failure.error.to_string(),
        }
    }
}

/// Serialize to a plain JS object (`null` for `None`, objects for maps).
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

pub(crate) fn extraction_error(e: ExtractionError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

pub(crate) fn conversion_error(e: ConversionError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
