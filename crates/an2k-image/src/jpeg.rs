//! JPEG baseline header walk.
//!
//! A JPEG stream is SOI (`FF D8`) followed by marker segments, each
//! `FF xx` plus a big-endian length that includes the length bytes
//! themselves. We read density from the JFIF APP0 segment and geometry
//! from the first SOFn frame header.

use an2k_wire::be::{read_u8, read_u16};

use crate::error::ProbeError;
use crate::{Colorspace, CompressionAlgorithm, ImageInfo};

/// Centimeter-to-inch factor for APP0 density unit 2.
const CM_PER_INCH: f64 = 2.54;

pub(crate) fn probe(bytes: &[u8]) -> Result<ImageInfo, ProbeError> {
    let mut ppi_x: u32 = 0;
    let mut ppi_y: u32 = 0;

    // Skip SOI, then walk marker segments.
    let mut cursor = 2usize;
    loop {
        let marker = next_marker(bytes, &mut cursor)?;
        match marker {
            // Standalone markers carry no length.
            0x01 | 0xD0..=0xD9 => {}

            // APP0: JFIF density, when present.
            0xE0 => {
                let len = segment_len(bytes, cursor)?;
                let body = &bytes[cursor + 2..cursor + len];
                if body.starts_with(b"JFIF\0") && body.len() >= 12 {
                    let units = body[7];
                    let x = u32::from(u16::from_be_bytes([body[8], body[9]]));
                    let y = u32::from(u16::from_be_bytes([body[10], body[11]]));
                    match units {
                        1 => (ppi_x, ppi_y) = (x, y),
                        2 => {
                            (ppi_x, ppi_y) = (
                                (f64::from(x) * CM_PER_INCH).round() as u32,
                                (f64::from(y) * CM_PER_INCH).round() as u32,
                            );
                        }
                        // Unit 0 is an aspect ratio, not a density.
                        _ => {}
                    }
                }
                cursor += len;
            }

            // SOFn frame headers: geometry, precision, component count.
            // C4 (DHT), C8 (JPG extension) and CC (DAC) share the range
            // but are not frame headers.
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                segment_len(bytes, cursor)?;
                let precision = read_u8(bytes, cursor + 2)
                    .map_err(|_| ProbeError::Truncated { expected: "SOF" })?;
                let height = read_u16(bytes, cursor + 3)
                    .map_err(|_| ProbeError::Truncated { expected: "SOF" })?;
                let width = read_u16(bytes, cursor + 5)
                    .map_err(|_| ProbeError::Truncated { expected: "SOF" })?;
                let components = read_u8(bytes, cursor + 7)
                    .map_err(|_| ProbeError::Truncated { expected: "SOF" })?;

                return Ok(ImageInfo {
                    compression: CompressionAlgorithm::Jpegb,
                    width: u32::from(width),
                    height: u32::from(height),
                    ppi_x,
                    ppi_y,
                    colorspace: if components == 1 {
                        Colorspace::Gray
                    } else {
                        Colorspace::Rgb
                    },
                    depth: u16::from(precision) * u16::from(components),
                });
            }

            // Entropy-coded data follows SOS; a frame header should have
            // appeared before it.
            0xDA => return Err(ProbeError::Truncated { expected: "SOF" }),

            _ => {
                cursor += segment_len(bytes, cursor)?;
            }
        }
    }
}

/// Advance past fill bytes and return the next marker code.
fn next_marker(bytes: &[u8], cursor: &mut usize) -> Result<u8, ProbeError> {
    loop {
        let byte = read_u8(bytes, *cursor).map_err(|_| ProbeError::Truncated {
            expected: "marker",
        })?;
        *cursor += 1;
        if byte != 0xFF {
            continue;
        }
        // 0xFF fill bytes may pad before the marker code.
        let mut code = read_u8(bytes, *cursor).map_err(|_| ProbeError::Truncated {
            expected: "marker",
        })?;
        *cursor += 1;
        while code == 0xFF {
            code = read_u8(bytes, *cursor).map_err(|_| ProbeError::Truncated {
                expected: "marker",
            })?;
            *cursor += 1;
        }
        return Ok(code);
    }
}

/// Length of the segment at `cursor`, including the two length bytes.
fn segment_len(bytes: &[u8], cursor: usize) -> Result<usize, ProbeError> {
    let len = read_u16(bytes, cursor).map_err(|_| ProbeError::Truncated {
        expected: "segment length",
    })?;
    if len < 2 || cursor + len as usize > bytes.len() {
        return Err(ProbeError::Truncated {
            expected: "segment body",
        });
    }
    Ok(len as usize)
}
