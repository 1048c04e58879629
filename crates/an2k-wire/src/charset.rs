//! Charset selection and text payload transcoding.
//!
//! The charset governing text payloads is discovered from the Type-1
//! "domain of use" field and applies to every text-tagged record after
//! Type-1. Tag bytes and separators stay ASCII regardless.
//!
//! ```text
//! ┌──────────────────────┬──────────┐
//! │ Domain-of-use value  │ Charset  │
//! ├──────────────────────┼──────────┤
//! │ starts with "002"    │ UTF-16   │
//! │ absent               │ UTF-16   │
//! │ starts with "003"    │ UTF-8    │
//! │ anything else        │ CP1256   │
//! └──────────────────────┴──────────┘
//! ```
//!
//! UTF-16 is big-endian without a BOM on encode; a leading BOM of either
//! byte order is honored on decode. CP1256 goes through
//! `encoding_rs::WINDOWS_1256` (encoding_rs has no UTF-16 encoder, so
//! that direction is hand-rolled over `str::encode_utf16`).

use encoding_rs::WINDOWS_1256;

use crate::error::WireError;

/// Text payload charset, discovered from the Type-1 header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Charset {
    Utf16,
    Utf8,
    /// Initial decoder state before Type-1 has been examined, and the
    /// fallback for unrecognized domain values.
    #[default]
    Cp1256,
}

impl Charset {
    /// Select the charset from the Type-1 "domain of use" value.
    ///
    /// The mapping is total: unrecognized values fall back to CP1256.
    pub fn from_domain(value: Option<&str>) -> Self {
        match value {
            None => Self::Utf16,
            Some(v) if v.starts_with("002") => Self::Utf16,
            Some(v) if v.starts_with("003") => Self::Utf8,
            Some(_) => Self::Cp1256,
        }
    }

    /// Human-readable charset name, used in error diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf16 => "UTF-16",
            Self::Utf8 => "UTF-8",
            Self::Cp1256 => "CP1256",
        }
    }

    /// Encode a string into payload bytes under this charset.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf16 => {
                let mut out = Vec::with_capacity(text.len() * 2);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                out
            }
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Cp1256 => {
                let (bytes, _, _) = WINDOWS_1256.encode(text);
                bytes.into_owned()
            }
        }
    }

    /// Decode payload bytes into a string under this charset.
    ///
    /// Unmappable CP1256 bytes and unpaired UTF-16 surrogates decode to
    /// the replacement character, matching the tolerant decoders of the
    /// source platform.
    ///
    /// # Errors
    ///
    /// [`WireError::UnsupportedCharset`] for an odd-length UTF-16 payload
    /// or invalid UTF-8.
    pub fn decode(self, bytes: &[u8]) -> Result<String, WireError> {
        match self {
            Self::Utf16 => {
                if bytes.len() % 2 != 0 {
                    return Err(WireError::UnsupportedCharset {
                        charset: self.name(),
                    });
                }
                let mut units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                match units.first() {
                    Some(0xFEFF) => {
                        units.remove(0);
                    }
                    // Little-endian BOM: the stream is byte-swapped.
                    Some(0xFFFE) => {
                        units.remove(0);
                        for unit in &mut units {
                            *unit = unit.swap_bytes();
                        }
                    }
                    _ => {}
                }
                Ok(String::from_utf16_lossy(&units))
            }
            Self::Utf8 => {
                std::str::from_utf8(bytes)
                    .map(str::to_owned)
                    .map_err(|_| WireError::UnsupportedCharset {
                        charset: self.name(),
                    })
            }
            Self::Cp1256 => {
                let (text, _, _) = WINDOWS_1256.decode(bytes);
                Ok(text.into_owned())
            }
        }
    }

    /// Byte length of `text` once encoded under this charset.
    ///
    /// This is what record LEN fields count — encoded bytes, never code
    /// points.
    pub fn encoded_len(self, text: &str) -> usize {
        match self {
            Self::Utf16 => text.encode_utf16().count() * 2,
            Self::Utf8 => text.len(),
            Self::Cp1256 => {
                let (bytes, _, _) = WINDOWS_1256.encode(text);
                bytes.len()
            }
        }
    }
}
