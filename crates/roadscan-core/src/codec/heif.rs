//! Minimal ISO base media file format (HEIF/HEIC) header reading.
//!
//! Only what is needed to report pixel dimensions without decoding HEVC
//! data: the `ftyp` brand check and the `ispe` (image spatial extents)
//! properties under `meta/iprp/ipco`.

use super::ExtractionError;

// Brands that mark a HEIF still image
const HEIF_BRANDS: [&[u8; 4]; 8] = [
    b"heic", b"heix", b"heim", b"heis", b"hevc", b"hevx", b"mif1", b"msf1",
];

const BOX_HEADER_LEN: usize = 8;
const FULL_BOX_HEADER_LEN: usize = 4;

/// Check the `ftyp` box for a HEIF brand.
pub(crate) fn is_heif(bytes: &[u8]) -> bool {
    let Some((kind, content)) = BoxIter::new(bytes).next() else {
        return false;
    };
    if &kind != b"ftyp" || content.len() < 8 {
        return false;
    }

    // major brand, minor version, then compatible brands
    let major = &content[0..4];
    let compatible = content[8..].chunks_exact(4);
    std::iter::once(major)
        .chain(compatible)
        .any(|brand| HEIF_BRANDS.iter().any(|b| b.as_slice() == brand))
}

/// Read the pixel dimensions of the primary image.
///
/// HEIC files usually carry several `ispe` properties (primary image, grid
/// tiles, thumbnails). The largest one is the full image.
pub(crate) fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), ExtractionError> {
    let meta = find_box(bytes, b"meta")
        .ok_or_else(|| ExtractionError::ContainerDecode("HEIF file has no meta box".into()))?;
    let meta = meta
        .get(FULL_BOX_HEADER_LEN..)
        .ok_or_else(|| ExtractionError::ContainerDecode("Truncated HEIF meta box".into()))?;

    let ipco = find_box(meta, b"iprp")
        .and_then(|iprp| find_box(iprp, b"ipco"))
        .ok_or_else(|| {
            ExtractionError::ContainerDecode("HEIF file has no item properties".into())
        })?;

    BoxIter::new(ipco)
        .filter(|(kind, _)| kind == b"ispe")
        .filter_map(|(_, content)| parse_ispe(content))
        .max_by_key(|&(w, h)| u64::from(w) * u64::from(h))
        .ok_or_else(|| ExtractionError::ContainerDecode("HEIF file has no image extents".into()))
}

fn parse_ispe(content: &[u8]) -> Option<(u32, u32)> {
    let width = read_u32_be(content, FULL_BOX_HEADER_LEN)?;
    let height = read_u32_be(content, FULL_BOX_HEADER_LEN + 4)?;
    Some((width, height))
}

fn find_box<'a>(data: &'a [u8], kind: &[u8; 4]) -> Option<&'a [u8]> {
    BoxIter::new(data)
        .find(|(k, _)| k == kind)
        .map(|(_, content)| content)
}

#[inline]
fn read_u32_be(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[inline]
fn read_u64_be(data: &[u8], offset: usize) -> Option<u64> {
    let bytes = data.get(offset..offset.checked_add(8)?)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Some(u64::from_be_bytes(buf))
}

/// Iterates sibling boxes, yielding `(type, content)`.
///
/// Stops at the first box whose size is inconsistent with the buffer.
struct BoxIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BoxIter<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for BoxIter<'a> {
    type Item = ([u8; 4], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let size = read_u32_be(self.data, start)?;
        let kind_bytes = self.data.get(start + 4..start + BOX_HEADER_LEN)?;
        let kind = [kind_bytes[0], kind_bytes[1], kind_bytes[2], kind_bytes[3]];

        let (header_len, total_len) = match size {
            // Box extends to the end of the enclosing data
            0 => (BOX_HEADER_LEN, self.data.len() - start),
            // 64-bit size follows the type
            1 => {
                let large = read_u64_be(self.data, start + BOX_HEADER_LEN)?;
                (BOX_HEADER_LEN + 8, usize::try_from(large).ok()?)
            }
            n => (BOX_HEADER_LEN, n as usize),
        };

        if total_len < header_len {
            return None;
        }
        let end = start.checked_add(total_len)?;
        let content = self.data.get(start + header_len..end)?;

        self.pos = end;
        Some((kind, content))
    }
}
