#![warn(clippy::pedantic)]

//! Image-header prober.
//!
//! Classifies an opaque image payload by magic bytes and extracts the
//! geometry and color metadata the record builders need — without
//! decoding a single pixel. Payloads stay opaque pass-through.
//!
//! ```text
//! ┌──────────────────────────────┬─────────┐
//! │ Leading bytes                │ Format  │
//! ├──────────────────────────────┼─────────┤
//! │ FF D8 FF                     │ JPEGB   │
//! │ 89 50 4E 47 0D 0A 1A 0A      │ PNG     │
//! │ 00 00 00 0C 6A 50 20 20 …    │ JP2     │
//! │ FF A0                        │ WSQ20   │
//! └──────────────────────────────┴─────────┘
//! ```

mod jp2;
mod jpeg;
mod png;
mod wsq;

pub mod error;

pub use error::ProbeError;

/// Compression algorithm of an image payload.
///
/// Carries both representations the records need: the one-byte code of
/// the binary GCA slot and the textual CGA label of tagged records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressionAlgorithm {
    None,
    Wsq20,
    Jpegb,
    Jp2,
    Png,
}

impl CompressionAlgorithm {
    /// One-byte GCA code for binary-framed records.
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Wsq20 => 1,
            Self::Jpegb => 2,
            Self::Jp2 => 4,
            Self::Png => 6,
        }
    }

    /// Textual CGA label for text-tagged records.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Wsq20 => "WSQ20",
            Self::Jpegb => "JPEGB",
            Self::Jp2 => "JP2",
            Self::Png => "PNG",
        }
    }
}

/// Colorspace classification: single-component gray or multi-component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colorspace {
    Gray,
    Rgb,
}

impl Colorspace {
    /// The CSP value for tagged records.
    pub fn label(self) -> &'static str {
        match self {
            Self::Gray => "GRAY",
            Self::Rgb => "RGB",
        }
    }
}

/// Everything the prober learns from an image header.
///
/// `ppi_x`/`ppi_y` are 0 when the header carries no density information;
/// the builders treat 0 as "unknown" and leave the field unset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub compression: CompressionAlgorithm,
    pub width: u32,
    pub height: u32,
    pub ppi_x: u32,
    pub ppi_y: u32,
    pub colorspace: Colorspace,
    pub depth: u16,
}

/// PNG file signature.
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG 2000 signature box (length + `jP  ` + CR LF 0x87 LF).
const JP2_MAGIC: [u8; 12] = [
    0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
];

/// Classify `bytes` and extract geometry/color metadata.
///
/// # Errors
///
/// - [`ProbeError::UnsupportedImage`] when no magic matches.
/// - [`ProbeError::Truncated`] when the matched format's header is cut
///   short.
pub fn probe(bytes: &[u8]) -> Result<ImageInfo, ProbeError> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return jpeg::probe(bytes);
    }
    if bytes.starts_with(&PNG_MAGIC) {
        return png::probe(bytes);
    }
    if bytes.starts_with(&JP2_MAGIC) || bytes.starts_with(&JP2_MAGIC[..8]) {
        return jp2::probe(bytes);
    }
    if bytes.starts_with(&[0xFF, 0xA0]) {
        return wsq::probe(bytes);
    }
    Err(ProbeError::UnsupportedImage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_magic_rejected() {
        assert!(matches!(probe(b"GIF89a"), Err(ProbeError::UnsupportedImage)));
        assert!(matches!(probe(&[]), Err(ProbeError::UnsupportedImage)));
        assert!(matches!(
            probe(&[0x00, 0x01, 0x02]),
            Err(ProbeError::UnsupportedImage)
        ));
    }

    #[test]
    fn gca_codes_and_labels() {
        assert_eq!(CompressionAlgorithm::None.code(), 0);
        assert_eq!(CompressionAlgorithm::Wsq20.code(), 1);
        assert_eq!(CompressionAlgorithm::Jpegb.code(), 2);
        assert_eq!(CompressionAlgorithm::Jp2.code(), 4);
        assert_eq!(CompressionAlgorithm::Png.code(), 6);
        assert_eq!(CompressionAlgorithm::Wsq20.label(), "WSQ20");
        assert_eq!(CompressionAlgorithm::Jpegb.label(), "JPEGB");
    }

    #[test]
    fn colorspace_labels() {
        assert_eq!(Colorspace::Gray.label(), "GRAY");
        assert_eq!(Colorspace::Rgb.label(), "RGB");
    }
}
