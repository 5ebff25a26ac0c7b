//! Hand-built image fixtures for unit tests.
//!
//! EXIF blocks are written as little-endian TIFF structures so tests can
//! control every tag, including malformed ones.

// Minimal valid JPEG bytes (1x1 pixel, no EXIF)
pub(crate) const MINIMAL_JPEG: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
    0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
    0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
    0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
    0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
    0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
    0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
    0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
    0xFF, 0xC4, 0x00, 0xB5, 0x10, 0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05,
    0x04, 0x04, 0x00, 0x00, 0x01, 0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
    0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
    0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A,
    0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37,
    0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56,
    0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75,
    0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93,
    0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9,
    0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6,
    0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
    0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7,
    0xF8, 0xF9, 0xFA, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5,
    0xDB, 0x20, 0xA8, 0xF1, 0x7E, 0xFF, 0xD9,
];

// TIFF field types
const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

// Tags
const TAG_MAKE: u16 = 0x010F;
const TAG_MODEL: u16 = 0x0110;
const TAG_SOFTWARE: u16 = 0x0131;
const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_GPS_IFD: u16 = 0x8825;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
const TAG_GPS_LATITUDE: u16 = 0x0002;
const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
const TAG_GPS_LONGITUDE: u16 = 0x0004;

const TIFF_HEADER_LEN: u32 = 8;

type Dms = ((u32, u32), (u32, u32), (u32, u32));

struct Entry {
    tag: u16,
    typ: u16,
    count: u32,
    payload: Vec<u8>,
}

impl Entry {
    fn ascii(tag: u16, bytes: &[u8]) -> Self {
        let mut payload = bytes.to_vec();
        payload.push(0);
        Self {
            tag,
            typ: TYPE_ASCII,
            count: payload.len() as u32,
            payload,
        }
    }

    fn long(tag: u16, value: u32) -> Self {
        Self {
            tag,
            typ: TYPE_LONG,
            count: 1,
            payload: value.to_le_bytes().to_vec(),
        }
    }

    fn rationals(tag: u16, (d, m, s): Dms) -> Self {
        let payload = [d, m, s]
            .iter()
            .flat_map(|&(num, denom)| {
                let mut bytes = num.to_le_bytes().to_vec();
                bytes.extend_from_slice(&denom.to_le_bytes());
                bytes
            })
            .collect();
        Self {
            tag,
            typ: TYPE_RATIONAL,
            count: 3,
            payload,
        }
    }

    /// Bytes stored outside the entry, padded to a word boundary.
    fn external_len(&self) -> u32 {
        if self.payload.len() <= 4 {
            0
        } else {
            (self.payload.len() as u32 + 1) & !1
        }
    }
}

fn ifd_len(entries: &[Entry]) -> u32 {
    2 + 12 * entries.len() as u32 + 4 + entries.iter().map(Entry::external_len).sum::<u32>()
}

fn write_ifd(out: &mut Vec<u8>, entries: &mut [Entry]) {
    entries.sort_by_key(|e| e.tag);

    let ifd_start = out.len() as u32;
    let mut data_offset = ifd_start + 2 + 12 * entries.len() as u32 + 4;
    let mut data = Vec::new();

    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries.iter() {
        out.extend_from_slice(&entry.tag.to_le_bytes());
        out.extend_from_slice(&entry.typ.to_le_bytes());
        out.extend_from_slice(&entry.count.to_le_bytes());
        if entry.payload.len() <= 4 {
            let mut inline = [0u8; 4];
            inline[..entry.payload.len()].copy_from_slice(&entry.payload);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&data_offset.to_le_bytes());
            data.extend_from_slice(&entry.payload);
            if entry.payload.len() % 2 == 1 {
                data.push(0);
            }
            data_offset += entry.external_len();
        }
    }
    // No next IFD
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data);
}

/// Builds a raw EXIF block (TIFF header onwards).
#[derive(Default)]
pub(crate) struct ExifBuilder {
    zeroth: Vec<Entry>,
    exif: Vec<Entry>,
    gps: Vec<Entry>,
}

impl ExifBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn make(mut self, value: &str) -> Self {
        self.zeroth.push(Entry::ascii(TAG_MAKE, value.as_bytes()));
        self
    }

    pub(crate) fn make_bytes(mut self, value: &[u8]) -> Self {
        self.zeroth.push(Entry::ascii(TAG_MAKE, value));
        self
    }

    pub(crate) fn model(mut self, value: &str) -> Self {
        self.zeroth.push(Entry::ascii(TAG_MODEL, value.as_bytes()));
        self
    }

    pub(crate) fn software(mut self, value: &str) -> Self {
        self.zeroth.push(Entry::ascii(TAG_SOFTWARE, value.as_bytes()));
        self
    }

    pub(crate) fn date_time(mut self, value: &str) -> Self {
        self.zeroth.push(Entry::ascii(TAG_DATE_TIME, value.as_bytes()));
        self
    }

    pub(crate) fn date_time_original(mut self, value: &str) -> Self {
        self.exif
            .push(Entry::ascii(TAG_DATE_TIME_ORIGINAL, value.as_bytes()));
        self
    }

    pub(crate) fn latitude(mut self, dms: Dms, reference: Option<&str>) -> Self {
        self.gps.push(Entry::rationals(TAG_GPS_LATITUDE, dms));
        if let Some(r) = reference {
            self.gps.push(Entry::ascii(TAG_GPS_LATITUDE_REF, r.as_bytes()));
        }
        self
    }

    pub(crate) fn longitude(mut self, dms: Dms, reference: Option<&str>) -> Self {
        self.gps.push(Entry::rationals(TAG_GPS_LONGITUDE, dms));
        if let Some(r) = reference {
            self.gps.push(Entry::ascii(TAG_GPS_LONGITUDE_REF, r.as_bytes()));
        }
        self
    }

    pub(crate) fn build(mut self) -> Vec<u8> {
        // Pointer entries are 4 bytes inline, so IFD0's size is known up front
        let pointer_count = usize::from(!self.exif.is_empty()) + usize::from(!self.gps.is_empty());
        let ifd0_len = ifd_len(&self.zeroth) + 12 * pointer_count as u32;
        let exif_offset = TIFF_HEADER_LEN + ifd0_len;
        let exif_len = if self.exif.is_empty() {
            0
        } else {
            ifd_len(&self.exif)
        };
        let gps_offset = exif_offset + exif_len;

        if !self.exif.is_empty() {
            self.zeroth.push(Entry::long(TAG_EXIF_IFD, exif_offset));
        }
        if !self.gps.is_empty() {
            self.zeroth.push(Entry::long(TAG_GPS_IFD, gps_offset));
        }

        let mut out = b"II*\0".to_vec();
        out.extend_from_slice(&TIFF_HEADER_LEN.to_le_bytes());
        write_ifd(&mut out, &mut self.zeroth);
        if !self.exif.is_empty() {
            debug_assert_eq!(out.len() as u32, exif_offset);
            write_ifd(&mut out, &mut self.exif);
        }
        if !self.gps.is_empty() {
            debug_assert_eq!(out.len() as u32, gps_offset);
            write_ifd(&mut out, &mut self.gps);
        }
        out
    }
}

/// Insert an APP1 EXIF segment right after the SOI marker of [`MINIMAL_JPEG`].
pub(crate) fn jpeg_with_exif(block: &[u8]) -> Vec<u8> {
    let segment_len = (2 + 6 + block.len()) as u16;

    let mut out = MINIMAL_JPEG[0..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(block);
    out.extend_from_slice(&MINIMAL_JPEG[2..]);
    out
}

/// Grayscale PNG of the given size with an optional `eXIf` chunk before the pixel data.
pub(crate) fn png_with_exif(width: u32, height: u32, block: Option<&[u8]>) -> Vec<u8> {
    let mut ihdr = width.to_be_bytes().to_vec();
    ihdr.extend_from_slice(&height.to_be_bytes());
    // 8-bit grayscale, deflate, adaptive filtering, no interlace
    ihdr.extend_from_slice(&[8, 0, 0, 0, 0]);

    let mut out = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    png_chunk(&mut out, b"IHDR", &ihdr);
    if let Some(block) = block {
        png_chunk(&mut out, b"eXIf", block);
    }
    png_chunk(&mut out, b"IDAT", &zlib_stored(&vec![0u8; ((width + 1) * height) as usize]));
    png_chunk(&mut out, b"IEND", &[]);
    out
}

fn png_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    let start = out.len();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let crc = crc32(&out[start..]);
    out.extend_from_slice(&crc.to_be_bytes());
}

/// zlib stream holding `data` in a single stored (uncompressed) block.
fn zlib_stored(data: &[u8]) -> Vec<u8> {
    let len = data.len() as u16;
    let mut out = vec![0x78, 0x01, 0x01];
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&(!len).to_le_bytes());
    out.extend_from_slice(data);

    let (mut a, mut b) = (1u32, 0u32);
    for &byte in data {
        a = (a + u32::from(byte)) % 65521;
        b = (b + a) % 65521;
    }
    out.extend_from_slice(&((b << 16) | a).to_be_bytes());
    out
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}
