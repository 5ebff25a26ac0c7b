//! Decoding of a raw EXIF block into record fields.

use exif::{Context, Exif, Field, In, Reader, Tag, Value};
use log::{debug, warn};

use super::{ExifFields, ExifGroup, GpsFields};
use crate::coordinate::RawGpsValue;

/// Decode a raw EXIF block (TIFF header onwards).
///
/// Malformed individual fields are skipped with a warning. A block that
/// cannot be parsed at all yields empty fields, the same as an image
/// without EXIF.
pub fn decode_exif_block(raw: Vec<u8>) -> ExifFields {
    let mut reader = Reader::new();
    reader.continue_on_error(true);

    let result = reader.read_raw(raw).or_else(|e| {
        e.distill_partial_result(|errors| {
            for err in errors {
                warn!("Skipping malformed EXIF field: {}", err);
            }
        })
    });

    match result {
        Ok(exif) => fields_from_exif(&exif),
        Err(e) => {
            warn!("Unreadable EXIF block, treating as absent: {}", e);
            ExifFields::default()
        }
    }
}

/// Which logical group a tag belongs to.
pub fn group_of(tag: Tag) -> ExifGroup {
    match tag.context() {
        Context::Tiff => ExifGroup::Zeroth,
        Context::Exif => ExifGroup::Exif,
        Context::Gps => ExifGroup::Gps,
        _ => ExifGroup::Interop,
    }
}

fn fields_from_exif(exif: &Exif) -> ExifFields {
    let mut fields = ExifFields::default();
    let mut gps = GpsFields::default();
    let mut counts = [0usize; 3];

    // Only the primary image; IFD1 describes the embedded thumbnail
    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        match group_of(field.tag) {
            ExifGroup::Zeroth => counts[0] += 1,
            ExifGroup::Exif => counts[1] += 1,
            ExifGroup::Gps => counts[2] += 1,
            ExifGroup::Interop => {}
        }

        match field.tag {
            Tag::Make => fields.make = text_value(field),
            Tag::Model => fields.model = text_value(field),
            Tag::Software => fields.software = text_value(field),
            Tag::DateTime => fields.date_time = text_value(field),
            Tag::DateTimeOriginal => fields.date_time_original = text_value(field),
            Tag::GPSLatitude => gps.latitude = gps_value(field),
            Tag::GPSLatitudeRef => gps.latitude_ref = text_value(field),
            Tag::GPSLongitude => gps.longitude = gps_value(field),
            Tag::GPSLongitudeRef => gps.longitude_ref = text_value(field),
            _ => {}
        }
    }

    debug!(
        "Decoded EXIF block: {} 0th, {} Exif, {} GPS tags",
        counts[0], counts[1], counts[2]
    );

    if counts[2] > 0 {
        fields.gps = Some(gps);
    }
    fields
}

/// Decode a text tag, dropping bytes that are not valid UTF-8.
fn text_value(field: &Field) -> Option<String> {
    let text = match &field.value {
        Value::Ascii(parts) => parts
            .iter()
            .map(|part| decode_lossy(part))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Byte(bytes) | Value::Undefined(bytes, _) => decode_lossy(bytes),
        _ => field.display_value().to_string(),
    };

    let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// UTF-8 decode that ignores invalid sequences.
pub(crate) fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect()
}

fn gps_value(field: &Field) -> Option<RawGpsValue> {
    match &field.value {
        Value::Rational(v) if v.len() >= 3 => {
            Some(RawGpsValue::new(v[0].into(), v[1].into(), v[2].into()))
        }
        other => {
            warn!("Ignoring {} with unexpected value {:?}", field.tag, other);
            None
        }
    }
}
