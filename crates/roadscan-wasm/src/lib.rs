//! Roadscan WASM - WebAssembly bindings for Roadscan
//!
//! This crate exposes the roadscan-core extraction pipeline to the upload
//! page running in the browser.
//!
//! # Module Structure
//!
//! - `extract` - Single-image and batch metadata extraction, map summary
//! - `coordinate` - GPS conversions between raw EXIF triples, decimal and `"D;M;S"`
//! - `logger` - Forwards `log` output to the browser console
//! - `types` - Conversions between JS values and core types
//!
//! # Usage
//!
//! ```typescript
//! import init, { extract_batch } from '@roadscan/wasm';
//!
//! await init();
//!
//! const files = await Promise.all(
//!   [...input.files].map(async (f) => ({
//!     name: f.name,
//!     bytes: new Uint8Array(await f.arrayBuffer()),
//!   })),
//! );
//! const report = extract_batch(files, Date.now(), { camera_placeholder: '-' });
//! console.log(report.summary);
//! ```

use wasm_bindgen::prelude::*;

mod coordinate;
mod extract;
mod logger;
mod types;

pub use coordinate::{convert_coordinate, from_sexagesimal, to_sexagesimal};
pub use extract::{extract_batch, extract_metadata, summarize_map};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Info);
}

/// Change how much core logging reaches the console
/// (`"off"`, `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::init(logger::level_from_str(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
