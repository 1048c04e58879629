//! Text-tagged record framing (types 1, 2, 9–17).
//!
//! One record is a run of fields, each suffixed by FS:
//!
//! ```text
//! ┌───────────────────────────┬────┬───────────────────────────┬────┬───┐
//! │ "{type}.{field:03}:value" │ FS │ "{type}.{field:03}:value" │ FS │ … │
//! └───────────────────────────┴────┴───────────────────────────┴────┴───┘
//! ```
//!
//! Field 1 (LEN) comes first and declares the byte count of the whole
//! record, trailing FS included — the reader is LEN-driven from then
//! on. The image-bearing types put raw bytes in field 999; those bytes
//! may legally contain FS, so once the tag `x.999:` has been read the
//! value span is *computed* from LEN instead of scanned, and clamped at
//! the buffer end for truncated captures.
//!
//! Tag bytes are always ASCII; values are encoded under the cursor's
//! active charset. The LEN value itself is ASCII digits regardless —
//! the length calculator counts one byte per digit for it.

use std::collections::BTreeMap;

use an2k_types::catalog;
use an2k_types::field::Field;
use an2k_types::record::Record;
use an2k_types::record_type::{Framing, RecordType};
use an2k_wire::Charset;
use an2k_wire::separators::FS;

use crate::cursor::Cursor;
use crate::error::CodecError;
use crate::length;

/// Read one text-tagged record at the cursor.
///
/// # Errors
///
/// [`CodecError::MalformedFraming`] for a tag without `:` or `.`, a
/// leading field other than LEN, a non-numeric LEN, or a tag naming a
/// different record type. Truncation against the declared LEN is *not*
/// an error — the record is clamped at the buffer end.
pub fn read(cursor: &mut Cursor<'_>, record_type: RecordType) -> Result<Record, CodecError> {
    let image_field = match record_type.framing() {
        Framing::Tagged { image_field } => image_field,
        Framing::Binary(_) => None,
    };

    let record_start = cursor.position();
    let mut fields: BTreeMap<u16, Field> = BTreeMap::new();
    let mut declared_len: Option<u64> = None;

    loop {
        if cursor.is_at_end() {
            break;
        }
        if let Some(len) = declared_len {
            if cursor.position() - record_start >= len as usize {
                break;
            }
        }

        let field_offset = cursor.position();
        let field_id = read_tag(cursor, record_type)?;

        if declared_len.is_none() && field_id != catalog::LEN {
            return Err(CodecError::MalformedFraming {
                detail: "record does not begin with LEN",
                offset: field_offset,
            });
        }

        if image_field == Some(field_id) {
            // Length-driven consumption: everything up to the record's
            // final FS belongs to the image, FS bytes included.
            let len = declared_len.ok_or(CodecError::MalformedFraming {
                detail: "image field before LEN",
                offset: field_offset,
            })? as usize;
            let value_end = record_start.saturating_add(len).saturating_sub(1);
            let span = value_end.saturating_sub(cursor.position());
            let value = cursor.take_up_to(span);
            fields.insert(field_id, Field::image(value.to_vec()));
            cursor.bump_if(FS);
            break;
        }

        let (value_bytes, _terminated) = cursor.take_until(FS);
        // LEN is a machine field: one ASCII byte per digit, whatever
        // the payload charset — its digit count is part of its own
        // length accounting.
        let text = if field_id == catalog::LEN {
            let ascii = std::str::from_utf8(value_bytes)
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok().map(|len| (s, len)));
            let (text, len) = ascii.ok_or(CodecError::MalformedFraming {
                detail: "non-numeric LEN",
                offset: field_offset,
            })?;
            declared_len = Some(len);
            text.to_owned()
        } else {
            cursor.charset().decode(value_bytes)?
        };
        fields.insert(field_id, Field::text(text));
    }

    Ok(Record::new(record_type, fields))
}

/// Parse `"{type}.{field:03}:"` at the cursor, returning the field id.
fn read_tag(cursor: &mut Cursor<'_>, record_type: RecordType) -> Result<u16, CodecError> {
    let offset = cursor.position();
    let rest = cursor.rest();
    let colon = rest
        .iter()
        .position(|&b| b == b':')
        .ok_or(CodecError::MalformedFraming {
            detail: "field tag without ':'",
            offset,
        })?;
    let span = &rest[..colon];
    if span.contains(&FS) {
        return Err(CodecError::MalformedFraming {
            detail: "field tag without ':'",
            offset,
        });
    }

    let text = std::str::from_utf8(span).map_err(|_| CodecError::MalformedFraming {
        detail: "field tag is not ASCII",
        offset,
    })?;
    let (type_part, id_part) = text.split_once('.').ok_or(CodecError::MalformedFraming {
        detail: "field tag without '.'",
        offset,
    })?;
    let tag: u8 = type_part
        .trim()
        .parse()
        .map_err(|_| CodecError::MalformedFraming {
            detail: "non-numeric record type in tag",
            offset,
        })?;
    let field_id: u16 = id_part
        .trim()
        .parse()
        .map_err(|_| CodecError::MalformedFraming {
            detail: "non-numeric field id in tag",
            offset,
        })?;
    if tag != record_type.tag() {
        return Err(CodecError::MalformedFraming {
            detail: "tag names a different record type",
            offset,
        });
    }

    cursor.take_exact(colon + 1)?;
    Ok(field_id)
}

/// Serialize one text-tagged record, recomputing LEN on the fly.
///
/// Fields go out in ascending id order; the stored field-1 value is
/// ignored in favor of the calculated length, so unmodified records
/// round-trip byte-identically and rebuilt ones come out correct.
pub fn write(out: &mut Vec<u8>, record: &Record, charset: Charset) -> Result<(), CodecError> {
    let tag = record.record_type().tag();
    let len = length::tagged_len(record, charset);

    for (id, field) in record.fields() {
        out.extend_from_slice(format!("{tag}.{id:03}:").as_bytes());
        if id == catalog::LEN {
            // ASCII digits, matching the one-byte-per-digit accounting
            // of the length calculator.
            out.extend_from_slice(len.to_string().as_bytes());
        } else {
            match field {
                Field::Text(s) => out.extend_from_slice(&charset.encode(s)),
                Field::Image(b) => out.extend_from_slice(b),
            }
        }
        out.push(FS);
    }
    Ok(())
}
