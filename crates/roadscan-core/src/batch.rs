//! Batch extraction over a list of uploads.
//!
//! Each image is independent, so a failing file only produces an
//! [`ImageFailure`] entry and never stops its siblings. Successful records
//! keep the relative order of their uploads.

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::codec::ExtractionError;
use crate::options::ExtractOptions;
use crate::record::ImageMetadataRecord;
use crate::report::{self, ReportError};

/// One uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    /// Position of the file in the submitted batch.
    pub index: usize,
    pub filename: String,
    pub error: ExtractionError,
}

/// Outcome of a batch: records in upload order plus per-file failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub records: Vec<ImageMetadataRecord>,
    pub failures: Vec<ImageFailure>,
}

impl BatchReport {
    /// Number of files submitted.
    pub fn total(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Records that carry a GPS location.
    pub fn located(&self) -> impl Iterator<Item = &ImageMetadataRecord> {
        self.records.iter().filter(|r| r.has_location())
    }

    /// e.g. `"2 of 3 images processed successfully"`.
    pub fn summary(&self) -> String {
        format!(
            "{} of {} images processed successfully",
            self.records.len(),
            self.total()
        )
    }

    /// CSV report of the successful records.
    pub fn to_csv(&self, options: &ExtractOptions) -> Result<String, ReportError> {
        report::to_csv(&self.records, options)
    }
}

/// Extract metadata for every upload.
///
/// Batches of at least `options.parallel_threshold` files run on the rayon
/// pool when the `parallel` feature is enabled.
pub fn process_batch(
    uploads: &[ImageUpload],
    fallback: DateTime<Utc>,
    options: &ExtractOptions,
) -> BatchReport {
    let outcomes = run(uploads, fallback, options);

    let mut report = BatchReport::default();
    for (index, (upload, outcome)) in uploads.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(record) => report.records.push(record),
            Err(error) => {
                warn!("Skipping {}: {}", upload.filename, error);
                report.failures.push(ImageFailure {
                    index,
                    filename: upload.filename.clone(),
                    error,
                });
            }
        }
    }

    info!("{}", report.summary());
    report
}

fn extract_one(
    upload: &ImageUpload,
    fallback: DateTime<Utc>,
) -> Result<ImageMetadataRecord, ExtractionError> {
    crate::extract_metadata(&upload.bytes, &upload.filename, fallback)
}

#[cfg(feature = "parallel")]
fn run(
    uploads: &[ImageUpload],
    fallback: DateTime<Utc>,
    options: &ExtractOptions,
) -> Vec<Result<ImageMetadataRecord, ExtractionError>> {
    use rayon::prelude::*;

    if uploads.len() < options.parallel_threshold {
        return uploads.iter().map(|u| extract_one(u, fallback)).collect();
    }

    // Indexed collect keeps upload order
    uploads
        .par_iter()
        .map(|u| extract_one(u, fallback))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run(
    uploads: &[ImageUpload],
    fallback: DateTime<Utc>,
    _options: &ExtractOptions,
) -> Vec<Result<ImageMetadataRecord, ExtractionError>> {
    uploads.iter().map(|u| extract_one(u, fallback)).collect()
}
