//! JPEG 2000 (JP2) box walk.
//!
//! A JP2 file is a sequence of boxes: `size(4) type(4) payload`, where
//! size counts the whole box and size 0 means "to end of file". The
//! geometry lives in the `ihdr` sub-box of the `jp2h` header box:
//!
//! ```text
//! jp2h ─┬─ ihdr: height(4) width(4) components(2) bpc(1) …
//!       └─ colr, res , …
//! ```
//!
//! JP2 carries no mandatory density; ppi probes as 0.

use an2k_wire::be::{read_u8, read_u16, read_u32};

use crate::error::ProbeError;
use crate::{Colorspace, CompressionAlgorithm, ImageInfo};

pub(crate) fn probe(bytes: &[u8]) -> Result<ImageInfo, ProbeError> {
    let jp2h = find_box(bytes, 0, bytes.len(), b"jp2h")
        .ok_or(ProbeError::Truncated { expected: "jp2h box" })?;
    let ihdr = find_box(bytes, jp2h.0, jp2h.1, b"ihdr")
        .ok_or(ProbeError::Truncated { expected: "ihdr box" })?;

    let at = ihdr.0;
    let height =
        read_u32(bytes, at).map_err(|_| ProbeError::Truncated { expected: "ihdr box" })?;
    let width =
        read_u32(bytes, at + 4).map_err(|_| ProbeError::Truncated { expected: "ihdr box" })?;
    let components =
        read_u16(bytes, at + 8).map_err(|_| ProbeError::Truncated { expected: "ihdr box" })?;
    let bpc =
        read_u8(bytes, at + 10).map_err(|_| ProbeError::Truncated { expected: "ihdr box" })?;

    // bpc stores depth-minus-one; the sign bit flags signed samples.
    let bits_per_component = u16::from(bpc & 0x7F) + 1;

    Ok(ImageInfo {
        compression: CompressionAlgorithm::Jp2,
        width,
        height,
        ppi_x: 0,
        ppi_y: 0,
        colorspace: if components == 1 {
            Colorspace::Gray
        } else {
            Colorspace::Rgb
        },
        depth: bits_per_component * components,
    })
}

/// Scan the box list in `bytes[start..end]` for `name`.
///
/// Returns the payload span `(payload_start, payload_end)`.
fn find_box(bytes: &[u8], start: usize, end: usize, name: &[u8; 4]) -> Option<(usize, usize)> {
    let mut cursor = start;
    while cursor + 8 <= end {
        let declared = read_u32(bytes, cursor).ok()? as usize;
        let box_type = bytes.get(cursor + 4..cursor + 8)?;

        // size 0: box extends to the end; size 1: 8-byte extended size.
        let (payload_start, box_end) = match declared {
            0 => (cursor + 8, end),
            1 => {
                let ext = read_u32(bytes, cursor + 12).ok()? as usize;
                let high = read_u32(bytes, cursor + 8).ok()?;
                if high != 0 {
                    return None;
                }
                (cursor + 16, cursor.checked_add(ext)?)
            }
            n => (cursor + 8, cursor.checked_add(n)?),
        };

        if box_type == name {
            return Some((payload_start, box_end.min(end)));
        }
        if box_end <= cursor {
            return None;
        }
        cursor = box_end;
    }
    None
}
