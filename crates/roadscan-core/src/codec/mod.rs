//! Metadata codec for uploaded photographs.
//!
//! This module provides functionality for:
//! - Recognizing the image container (JPEG, PNG, HEIC) and reading its
//!   pixel dimensions from the header alone
//! - Lifting the embedded EXIF block out of the container
//! - Decoding camera fields, timestamps and raw GPS rationals from the
//!   "0th", "Exif" and "GPS" tag groups
//!
//! # Failure scope
//!
//! Only an unreadable container is an error, and it is scoped to that one
//! image. A missing EXIF segment, a malformed field or an unparseable
//! timestamp degrade to absent values instead.
//!
//! # Examples
//!
//! ```ignore
//! use roadscan_core::codec::{decode_exif_block, read_container};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let container = read_container(&bytes)?;
//! let fields = container.exif.map(decode_exif_block).unwrap_or_default();
//! println!("{}x{} taken with {:?}", container.width, container.height, fields.model);
//! ```

mod container;
mod exif_block;
mod heif;
mod timestamp;
mod types;

pub use container::{read_container, sniff_format};
pub use exif_block::{decode_exif_block, group_of};
pub use timestamp::{
    parse_exif_datetime, resolve_timestamp, Timestamp, TimestampSource, EXIF_DATETIME_FORMAT,
};
pub use types::{
    ContainerFormat, ExifFields, ExifGroup, ExtractionError, GpsFields, ImageContainer,
};
