//! CSV export of record rows.

use thiserror::Error;

use crate::options::ExtractOptions;
use crate::record::{ImageMetadataRecord, RecordRow};

/// Suggested file name for a downloaded report.
pub const REPORT_FILENAME: &str = "exif_report.csv";

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV report is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Render records as CSV, one row per record in the given order.
///
/// The header row is always written, even for an empty slice. Absent
/// camera fields use the placeholder from `options`; absent coordinates
/// are empty cells.
pub fn to_csv(
    records: &[ImageMetadataRecord],
    options: &ExtractOptions,
) -> Result<String, ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(RecordRow::COLUMNS)?;
    for record in records {
        writer.serialize(record.to_row(options))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
