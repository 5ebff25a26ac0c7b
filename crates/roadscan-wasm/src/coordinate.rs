//! GPS coordinate bindings.
//!
//! Raw values are passed from JS as three `[numerator, denominator]` pairs,
//! the same shape EXIF stores them in.

use roadscan_core::coordinate::{
    from_sexagesimal_string, to_decimal, to_sexagesimal_string, ConversionError,
};
use wasm_bindgen::prelude::*;

use crate::types::{conversion_error, hemisphere_from_js, raw_from_triples, RawTriples};

/// Convert a raw GPS triple to signed decimal degrees.
///
/// `reference` is one of `"N"`, `"S"`, `"E"`, `"W"`; `"S"` and `"W"`
/// negate the result. Omit it to get the unsigned magnitude.
#[wasm_bindgen]
pub fn convert_coordinate(raw: JsValue, reference: Option<String>) -> Result<f64, JsValue> {
    let triples = triples_from_js(raw)?;
    convert_triples(triples, reference.as_deref()).map_err(conversion_error)
}

/// Format a raw GPS triple as `"D;M;S.sss"`.
#[wasm_bindgen]
pub fn to_sexagesimal(raw: JsValue) -> Result<String, JsValue> {
    let triples = triples_from_js(raw)?;
    to_sexagesimal_string(&raw_from_triples(triples)).map_err(conversion_error)
}

/// Parse a `"D;M;S"` string back to decimal degrees.
///
/// Returns `undefined` for malformed input.
#[wasm_bindgen]
pub fn from_sexagesimal(value: &str) -> Option<f64> {
    from_sexagesimal_string(value)
}

fn triples_from_js(raw: JsValue) -> Result<RawTriples, JsValue> {
    serde_wasm_bindgen::from_value(raw).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn convert_triples(triples: RawTriples, reference: Option<&str>) -> Result<f64, ConversionError> {
    let hemisphere = hemisphere_from_js(reference)?;
    to_decimal(&raw_from_triples(triples), hemisphere).map(|c| c.degrees)
}
