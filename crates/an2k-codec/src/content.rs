//! The Type-1 content directory (CNT, field 3).
//!
//! The directory enumerates every logical record in the file. Rows are
//! joined by RS; within a row the record type and IDC are joined by US:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────┐
//! │ Row          │ Meaning                                  │
//! ├──────────────┼──────────────────────────────────────────┤
//! │ 1 US N       │ N = count of records other than Type-1   │
//! │ tag US idc   │ one row per record, serialization order  │
//! └──────────────┴──────────────────────────────────────────┘
//! ```
//!
//! The directory is only correct for files emitted by the builder or
//! the reader — never for an ad-hoc record map.

use an2k_types::file::An2kFile;
use an2k_types::record_type::RecordType;
use an2k_wire::separators::{RS, US};

use crate::error::CodecError;

/// Directory rows for `file`: the leading `(1, N)` row followed by one
/// `(tag, idc)` row per non-Type-1 record in serialization order.
pub fn directory_entries(file: &An2kFile) -> Vec<(u8, u32)> {
    let mut entries = Vec::with_capacity(file.record_count());
    let count = file.record_count() - 1;
    entries.push((1, count as u32));
    for record in file.non_transaction() {
        entries.push((record.record_type().tag(), record.idc()));
    }
    entries
}

/// Render directory rows into the CNT field value.
pub fn render(entries: &[(u8, u32)]) -> String {
    let rows: Vec<String> = entries
        .iter()
        .map(|&(tag, idc)| format!("{tag}{}{idc}", US as char))
        .collect();
    rows.join(&(RS as char).to_string())
}

/// Parse a CNT field value back into directory rows.
///
/// Rows after the first must name taxonomy types; the reserved tags
/// (18–22, 98, 99) and anything else out of range fail with
/// `UnknownRecordType`.
///
/// # Errors
///
/// - [`CodecError::MalformedFraming`] for a row without US or with
///   non-numeric components.
/// - [`CodecError::Type`] (`UnknownRecordType`) for an out-of-taxonomy
///   tag.
pub fn parse(value: &str) -> Result<Vec<(u8, u32)>, CodecError> {
    if value.is_empty() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for (index, row) in value.split(RS as char).enumerate() {
        let (tag, idc) = row
            .split_once(US as char)
            .ok_or(CodecError::MalformedFraming {
                detail: "content directory row without US",
                offset: 0,
            })?;
        let tag: u8 = tag
            .trim()
            .parse()
            .map_err(|_| CodecError::MalformedFraming {
                detail: "non-numeric record type in content directory",
                offset: 0,
            })?;
        let idc: u32 = idc
            .trim()
            .parse()
            .map_err(|_| CodecError::MalformedFraming {
                detail: "non-numeric IDC in content directory",
                offset: 0,
            })?;
        if index > 0 {
            RecordType::from_tag(tag)?;
        }
        entries.push((tag, idc));
    }
    Ok(entries)
}
