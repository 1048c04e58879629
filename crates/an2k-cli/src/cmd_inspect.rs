//! Implementation of `an2k inspect`.
//!
//! Decodes the file and prints a per-record summary:
//!
//! ```text
//! record  1  Transaction information          IDC 0   LEN 218
//! record  2  User-defined descriptive text    IDC 1   LEN 64
//! record 10  Facial and SMT image             IDC 1   LEN 32918
//! ```
//!
//! With `--show-fields`, each record is followed by its fields; text
//! values print as-is (truncated to 60 characters), image fields print
//! their byte count.

use std::fs;

use anyhow::{Context, Result};
use an2k_codec::decode;
use an2k_types::field::Field;

use crate::InspectArgs;

/// Maximum characters of a text value shown per field line.
const VALUE_PREVIEW: usize = 60;

/// Run the `an2k inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to decode.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let file = decode(&bytes).with_context(|| format!("cannot decode {}", args.file.display()))?;

    println!(
        "{} — {} records, {} bytes",
        args.file.display(),
        file.record_count(),
        bytes.len()
    );

    for record in file.iter() {
        let record_type = record.record_type();
        println!(
            "record {:>2}  {:<44} IDC {:<4} LEN {}",
            record_type.tag(),
            record_type.label(),
            record.idc(),
            record.declared_len().unwrap_or(0),
        );

        if args.show_fields {
            for (id, field) in record.fields() {
                match field {
                    Field::Text(value) => {
                        let mut preview: String = value.chars().take(VALUE_PREVIEW).collect();
                        if value.chars().count() > VALUE_PREVIEW {
                            preview.push('…');
                        }
                        // Control separators inside CNT print as '|'.
                        let preview: String = preview
                            .chars()
                            .map(|c| if c.is_control() { '|' } else { c })
                            .collect();
                        println!("    {:>2}.{id:03}  {preview}", record_type.tag());
                    }
                    Field::Image(data) => {
                        println!(
                            "    {:>2}.{id:03}  <image, {} bytes>",
                            record_type.tag(),
                            data.len()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
