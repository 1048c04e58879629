/// Errors from the image-header prober.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The payload's leading bytes match no supported image format.
    #[error("unrecognized image magic")]
    UnsupportedImage,

    /// The payload ends before the named header structure.
    #[error("image data ends before {expected}")]
    Truncated { expected: &'static str },
}
