//! PNG header walk: IHDR geometry plus the optional pHYs density chunk.
//!
//! Chunks are `length(4) type(4) data crc(4)`, big-endian, and IHDR is
//! required to come first. CRCs are not verified — this is a prober,
//! not a decoder.

use an2k_wire::be::{read_u8, read_u32};

use crate::error::ProbeError;
use crate::{Colorspace, CompressionAlgorithm, ImageInfo};

/// pHYs unit 1 is pixels per meter.
const METERS_PER_INCH: f64 = 0.0254;

pub(crate) fn probe(bytes: &[u8]) -> Result<ImageInfo, ProbeError> {
    // IHDR directly after the 8-byte signature.
    let ihdr_len = read_u32(bytes, 8).map_err(|_| ProbeError::Truncated { expected: "IHDR" })?;
    if ihdr_len < 13 || bytes.get(12..16) != Some(b"IHDR") {
        return Err(ProbeError::Truncated { expected: "IHDR" });
    }
    let width = read_u32(bytes, 16).map_err(|_| ProbeError::Truncated { expected: "IHDR" })?;
    let height = read_u32(bytes, 20).map_err(|_| ProbeError::Truncated { expected: "IHDR" })?;
    let bit_depth =
        read_u8(bytes, 24).map_err(|_| ProbeError::Truncated { expected: "IHDR" })?;
    let color_type =
        read_u8(bytes, 25).map_err(|_| ProbeError::Truncated { expected: "IHDR" })?;

    let channels: u16 = match color_type {
        0 | 3 => 1,
        4 => 2,
        6 => 4,
        _ => 3,
    };
    let colorspace = match color_type {
        0 | 4 => Colorspace::Gray,
        _ => Colorspace::Rgb,
    };

    let (ppi_x, ppi_y) = find_phys(bytes).unwrap_or((0, 0));

    Ok(ImageInfo {
        compression: CompressionAlgorithm::Png,
        width,
        height,
        ppi_x,
        ppi_y,
        colorspace,
        depth: u16::from(bit_depth) * channels,
    })
}

/// Walk the chunk list for a pHYs chunk with unit 1 (meters).
///
/// Stops at IDAT — pHYs must precede the image data when present.
fn find_phys(bytes: &[u8]) -> Option<(u32, u32)> {
    let mut cursor = 8usize;
    loop {
        let len = read_u32(bytes, cursor).ok()? as usize;
        let chunk_type = bytes.get(cursor + 4..cursor + 8)?;
        match chunk_type {
            b"pHYs" => {
                if len < 9 {
                    return None;
                }
                let x_ppm = read_u32(bytes, cursor + 8).ok()?;
                let y_ppm = read_u32(bytes, cursor + 12).ok()?;
                let unit = read_u8(bytes, cursor + 16).ok()?;
                if unit != 1 {
                    return None;
                }
                return Some((
                    (f64::from(x_ppm) * METERS_PER_INCH).round() as u32,
                    (f64::from(y_ppm) * METERS_PER_INCH).round() as u32,
                ));
            }
            b"IDAT" | b"IEND" => return None,
            _ => {
                // length + type + data + crc
                cursor = cursor.checked_add(len + 12)?;
            }
        }
    }
}
