//! Implementation of `an2k probe`.
//!
//! Classifies a standalone image payload and prints the extracted
//! metadata as a single JSON object:
//!
//! ```json
//! {
//!   "compression": "JPEGB",
//!   "width": 1024,
//!   "height": 959,
//!   "ppi_x": 300,
//!   "ppi_y": 300,
//!   "colorspace": "RGB",
//!   "depth": 24
//! }
//! ```

use std::fs;

use anyhow::{Context, Result};
use an2k_image::probe;
use serde_json::json;

use crate::ProbeArgs;

/// Run the `an2k probe` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the payload's magic
/// is not a supported image format.
pub fn run(args: &ProbeArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let info = probe(&bytes)
        .with_context(|| format!("cannot classify {}", args.file.display()))?;

    let report = json!({
        "compression": info.compression.label(),
        "width": info.width,
        "height": info.height,
        "ppi_x": info.ppi_x,
        "ppi_y": info.ppi_y,
        "colorspace": info.colorspace.label(),
        "depth": info.depth,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
