#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete value could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// An integer pack/unpack was requested with a width outside 1..=8.
    #[error("unsupported integer width: {width} bytes (expected 1..=8)")]
    IntWidth { width: usize },

    /// A value does not fit the requested integer width.
    #[error("value {value} does not fit in {width} bytes")]
    IntOverflow { value: u64, width: usize },

    /// A text payload could not be decoded under the active charset.
    #[error("text payload is not valid {charset}")]
    UnsupportedCharset { charset: &'static str },

    /// I/O error during read or write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
