//! WSQ (Wavelet Scalar Quantization) header walk.
//!
//! WSQ borrows JPEG's marker-segment shape with its own marker space:
//!
//! ```text
//! ┌────────┬──────────────────────────────┐
//! │ Marker │ Segment                      │
//! ├────────┼──────────────────────────────┤
//! │ FF A0  │ Start of image (no payload)  │
//! │ FF A1  │ End of image                 │
//! │ FF A2  │ Frame header                 │
//! │ FF A3  │ Start of block               │
//! │ FF A4  │ Transform table              │
//! │ FF A5  │ Quantization table           │
//! │ FF A6  │ Huffman table                │
//! │ FF A8  │ Comment (NISTCOM)            │
//! └────────┴──────────────────────────────┘
//! ```
//!
//! The frame header carries the geometry: `Lf(2) black(1) white(1)
//! height(2) width(2) …`. Density is not part of the frame; scanners
//! record it in a NISTCOM comment segment as a `PPI <n>` pair, which is
//! honored when present. Fingerprint WSQ is always 8-bit grayscale.

use an2k_wire::be::{read_u8, read_u16};

use crate::error::ProbeError;
use crate::{Colorspace, CompressionAlgorithm, ImageInfo};

pub(crate) fn probe(bytes: &[u8]) -> Result<ImageInfo, ProbeError> {
    let mut geometry: Option<(u32, u32)> = None;
    let mut ppi: u32 = 0;

    let mut cursor = 2usize;
    while cursor + 2 <= bytes.len() {
        if read_u8(bytes, cursor).unwrap_or(0) != 0xFF {
            return Err(ProbeError::Truncated { expected: "marker" });
        }
        let marker = read_u8(bytes, cursor + 1)
            .map_err(|_| ProbeError::Truncated { expected: "marker" })?;
        cursor += 2;

        match marker {
            // End of image, or the entropy-coded block data — the frame
            // header must already have been seen.
            0xA1 | 0xA3 => break,

            // Frame header.
            0xA2 => {
                let height = read_u16(bytes, cursor + 4).map_err(|_| ProbeError::Truncated {
                    expected: "frame header",
                })?;
                let width = read_u16(bytes, cursor + 6).map_err(|_| ProbeError::Truncated {
                    expected: "frame header",
                })?;
                geometry = Some((u32::from(width), u32::from(height)));
                cursor += segment_len(bytes, cursor)?;
            }

            // NISTCOM comment: scan for a "PPI <n>" pair.
            0xA8 => {
                let len = segment_len(bytes, cursor)?;
                let body = &bytes[cursor + 2..cursor + len];
                if let Some(value) = find_ppi(body) {
                    ppi = value;
                }
                cursor += len;
            }

            _ => {
                cursor += segment_len(bytes, cursor)?;
            }
        }
    }

    let (width, height) = geometry.ok_or(ProbeError::Truncated {
        expected: "frame header",
    })?;
    Ok(ImageInfo {
        compression: CompressionAlgorithm::Wsq20,
        width,
        height,
        ppi_x: ppi,
        ppi_y: ppi,
        colorspace: Colorspace::Gray,
        depth: 8,
    })
}

/// Segment length at `cursor`, including the two length bytes.
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

/// Extract the value following a `PPI` token in a NISTCOM body.
fn find_ppi(body: &[u8]) -> Option<u32> {
    let text = String::from_utf8_lossy(body);
    let mut tokens = text.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "PPI" {
            return tokens.next()?.parse().ok();
        }
    }
    None
}
