//! Container sniffing, header-only dimension reads and EXIF block lifting.

use std::io::Cursor;

use exif::Reader;
use image::{ImageFormat, ImageReader};
use log::{debug, warn};

use super::heif;
use super::{ContainerFormat, ExtractionError, ImageContainer};

// Container magic bytes
const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Identify the container format from its leading bytes.
pub fn sniff_format(bytes: &[u8]) -> Option<ContainerFormat> {
    if bytes.starts_with(&JPEG_MAGIC) {
        Some(ContainerFormat::Jpeg)
    } else if bytes.starts_with(&PNG_MAGIC) {
        Some(ContainerFormat::Png)
    } else if heif::is_heif(bytes) {
        Some(ContainerFormat::Heif)
    } else {
        None
    }
}

/// Read dimensions and the embedded EXIF block from an image file.
///
/// Pixel data is never decoded; only the container header is parsed.
///
/// # Errors
///
/// - `ExtractionError::EmptyInput` - no bytes
/// - `ExtractionError::UnsupportedFormat` - not JPEG, PNG or HEIF
/// - `ExtractionError::ContainerDecode` - header unreadable or zero-sized image
///
/// A missing or unreadable EXIF segment is not an error: `exif` is `None`.
pub fn read_container(bytes: &[u8]) -> Result<ImageContainer, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::EmptyInput);
    }

    let format = sniff_format(bytes).ok_or(ExtractionError::UnsupportedFormat)?;
    debug!("Detected {} container ({} bytes)", format.as_str(), bytes.len());

    let (width, height) = match format {
        ContainerFormat::Jpeg => read_dimensions(bytes, ImageFormat::Jpeg)?,
        ContainerFormat::Png => read_dimensions(bytes, ImageFormat::Png)?,
        ContainerFormat::Heif => heif::read_dimensions(bytes)?,
    };

    if width == 0 || height == 0 {
        return Err(ExtractionError::ContainerDecode(format!(
            "Image has zero dimensions ({}x{})",
            width, height
        )));
    }

    Ok(ImageContainer {
        format,
        width,
        height,
        exif: read_exif_segment(bytes),
    })
}

fn read_dimensions(bytes: &[u8], format: ImageFormat) -> Result<(u32, u32), ExtractionError> {
    ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| ExtractionError::ContainerDecode(e.to_string()))
}

/// Lift the raw EXIF block (TIFF header onwards) out of the container.
fn read_exif_segment(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut reader = Reader::new();
    reader.continue_on_error(true);

    let result = reader
        .read_from_container(&mut Cursor::new(bytes))
        .or_else(|e| e.distill_partial_result(|_| {}));

    match result {
        Ok(exif) => Some(exif.buf().to_vec()),
        Err(exif::Error::NotFound(_)) => {
            debug!("No EXIF segment in container");
            None
        }
        Err(e) => {
            warn!("Ignoring unreadable EXIF segment: {}", e);
            None
        }
    }
}
