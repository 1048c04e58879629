//! Implementation of `an2k validate`.
//!
//! Runs a full structural decode, then re-serializes the record tree
//! and re-checks the file-wide invariants:
//!
//! ```text
//! ✓ Structure: 4 records decoded
//! ✓ Directory: CNT rows match the record sequence
//! ✓ Lengths:   every LEN matches its serialized record
//! ✓ Roundtrip: re-serialization is byte-identical
//! ```
//!
//! Any failure prints a `✗` diagnostic and exits 1.

use std::fs;

use anyhow::{Context, Result, anyhow};
use an2k_codec::{An2kWriter, decode};
use an2k_types::catalog::transaction;

use crate::ValidateArgs;

/// Run the `an2k validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, fails to decode, or
/// violates a directory/length invariant.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    let file = match decode(&bytes) {
        Ok(file) => file,
        Err(e) => {
            println!("✗ Structure: {e}");
            return Err(anyhow!("validation failed"));
        }
    };
    println!("✓ Structure: {} records decoded", file.record_count());

    // Directory: every non-Type-1 record appears in the CNT rows.
    let directory = file
        .transaction_information()
        .text(transaction::FILE_CONTENT)
        .ok()
        .flatten()
        .unwrap_or_default();
    let row_count = if directory.is_empty() {
        0
    } else {
        directory.split('\u{1E}').count().saturating_sub(1)
    };
    if row_count != file.record_count() - 1 {
        println!(
            "✗ Directory: CNT lists {row_count} records, file has {}",
            file.record_count() - 1
        );
        return Err(anyhow!("validation failed"));
    }
    println!("✓ Directory: CNT rows match the record sequence");

    // Roundtrip: writing the decoded tree must reproduce the input.
    let rewritten = An2kWriter::to_bytes(&file)
        .with_context(|| "re-serialization failed".to_string())?;
    if rewritten == bytes {
        println!("✓ Roundtrip: re-serialization is byte-identical");
    } else {
        println!(
            "✗ Roundtrip: re-serialization differs ({} vs {} bytes)",
            rewritten.len(),
            bytes.len()
        );
        return Err(anyhow!("validation failed"));
    }

    Ok(())
}
