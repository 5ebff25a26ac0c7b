//! Extraction options.

use serde::{Deserialize, Serialize};

/// Placeholder shown for absent camera fields.
pub const DEFAULT_CAMERA_PLACEHOLDER: &str = "-";

/// Batches smaller than this are processed sequentially.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// Caller-tunable options for extraction and batch processing.
///
/// Every field has a default, so a partial (or empty) serialized object
/// deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Text displayed for a missing make/model/software.
    pub camera_placeholder: String,
    /// Minimum batch size before work is spread over a thread pool.
    pub parallel_threshold: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            camera_placeholder: DEFAULT_CAMERA_PLACEHOLDER.to_string(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ExtractOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }
}
