//! Binary-framed record handling (types 3–8).
//!
//! Fixed-offset big-endian prefix, then opaque DATA to the declared
//! LEN. Three layouts share the shape:
//!
//! ```text
//! Grayscale (3/4/6/7)   LEN(4) IDC(1) IMP(1) FGP(6) ISR(1) HLL(2) VLL(2) GCA(1) DATA
//! Reduced   (5)         LEN(4) IDC(1) IMP(1) ISR(1) HLL(2) VLL(2)               DATA
//! Signature (8)         LEN(4) IDC(1) SIG(1) SRT(1) ISR(1) HLL(2) VLL(2)        DATA
//! ```
//!
//! Scalar prefix fields are stored as decimal text fields; FGP keeps
//! its six raw bytes as an image field so unused-position markers
//! (0xFF) survive round-trips untouched.

use std::collections::BTreeMap;

use an2k_types::catalog::{grayscale, reduced, signature};
use an2k_types::field::Field;
use an2k_types::record::Record;
use an2k_types::record_type::{BinaryLayout, Framing, RecordType};
use an2k_wire::be;

use crate::cursor::Cursor;
use crate::error::CodecError;
use crate::length;

/// Read one binary-framed record at the cursor.
///
/// # Errors
///
/// - [`CodecError::MalformedFraming`] when LEN is smaller than the
///   layout's fixed prefix.
/// - [`CodecError::UnexpectedEndOfInput`] when the prefix itself is cut
///   short. DATA truncation, by contrast, is tolerated: the payload is
///   clamped at the buffer end and the record succeeds.
pub fn read(cursor: &mut Cursor<'_>, record_type: RecordType) -> Result<Record, CodecError> {
    let layout = match record_type.framing() {
        Framing::Binary(layout) => layout,
        Framing::Tagged { .. } => {
            return Err(CodecError::MalformedFraming {
                detail: "text-tagged type dispatched to the binary handler",
                offset: cursor.position(),
            });
        }
    };

    let record_offset = cursor.position();
    let prefix = cursor.take_exact(layout.fixed_size())?;
    let len = be::read_u32(prefix, 0).map_err(CodecError::Wire)? as usize;
    if len < layout.fixed_size() {
        return Err(CodecError::MalformedFraming {
            detail: "LEN shorter than the fixed prefix",
            offset: record_offset,
        });
    }

    let mut fields: BTreeMap<u16, Field> = BTreeMap::new();
    fields.insert(1, Field::text(len.to_string()));
    fields.insert(2, Field::text(prefix[4].to_string()));

    let data_field = match layout {
        BinaryLayout::Grayscale => {
            fields.insert(grayscale::IMP, Field::text(prefix[5].to_string()));
            fields.insert(grayscale::FGP, Field::image(prefix[6..12].to_vec()));
            fields.insert(grayscale::ISR, Field::text(prefix[12].to_string()));
            fields.insert(
                grayscale::HLL,
                Field::text(be::read_u16(prefix, 13).map_err(CodecError::Wire)?.to_string()),
            );
            fields.insert(
                grayscale::VLL,
                Field::text(be::read_u16(prefix, 15).map_err(CodecError::Wire)?.to_string()),
            );
            fields.insert(grayscale::GCA, Field::text(prefix[17].to_string()));
            grayscale::DATA
        }
        BinaryLayout::Reduced => {
            fields.insert(reduced::IMP, Field::text(prefix[5].to_string()));
            fields.insert(reduced::ISR, Field::text(prefix[6].to_string()));
            fields.insert(
                reduced::HLL,
                Field::text(be::read_u16(prefix, 7).map_err(CodecError::Wire)?.to_string()),
            );
            fields.insert(
                reduced::VLL,
                Field::text(be::read_u16(prefix, 9).map_err(CodecError::Wire)?.to_string()),
            );
            reduced::DATA
        }
        BinaryLayout::Signature => {
            fields.insert(signature::SIG, Field::text(prefix[5].to_string()));
            fields.insert(signature::SRT, Field::text(prefix[6].to_string()));
            fields.insert(signature::ISR, Field::text(prefix[7].to_string()));
            fields.insert(
                signature::HLL,
                Field::text(be::read_u16(prefix, 8).map_err(CodecError::Wire)?.to_string()),
            );
            fields.insert(
                signature::VLL,
                Field::text(be::read_u16(prefix, 10).map_err(CodecError::Wire)?.to_string()),
            );
            signature::DATA
        }
    };

    // Clamped at the buffer end for truncated captures.
    let data = cursor.take_up_to(len - layout.fixed_size());
    fields.insert(data_field, Field::image(data.to_vec()));

    Ok(Record::new(record_type, fields))
}

/// Serialize one binary-framed record, recomputing LEN from the DATA
/// payload.
///
/// # Errors
///
/// [`CodecError::UnserializableField`] for a missing roster field or a
/// value that does not fit its wire slot.
pub fn write(out: &mut Vec<u8>, record: &Record) -> Result<(), CodecError> {
    let layout = match record.record_type().framing() {
        Framing::Binary(layout) => layout,
        Framing::Tagged { .. } => {
            return Err(CodecError::MalformedFraming {
                detail: "text-tagged type dispatched to the binary handler",
                offset: 0,
            });
        }
    };

    let data_field = match layout {
        BinaryLayout::Grayscale => grayscale::DATA,
        BinaryLayout::Reduced => reduced::DATA,
        BinaryLayout::Signature => signature::DATA,
    };
    let data = record
        .image(data_field)
        .map_err(CodecError::Type)?
        .ok_or(CodecError::UnserializableField {
            field_id: data_field,
        })?;

    let len = length::binary_len(layout, data.len())?;
    be::put_u32(out, len);
    out.push(scalar_u8(record, 2)?);

    match layout {
        BinaryLayout::Grayscale => {
            out.push(scalar_u8(record, grayscale::IMP)?);
            out.extend_from_slice(&finger_positions(record, grayscale::FGP)?);
            out.push(scalar_u8(record, grayscale::ISR)?);
            be::put_u16(out, scalar_u16(record, grayscale::HLL)?);
            be::put_u16(out, scalar_u16(record, grayscale::VLL)?);
            out.push(scalar_u8(record, grayscale::GCA)?);
        }
        BinaryLayout::Reduced => {
            out.push(scalar_u8(record, reduced::IMP)?);
            out.push(scalar_u8(record, reduced::ISR)?);
            be::put_u16(out, scalar_u16(record, reduced::HLL)?);
            be::put_u16(out, scalar_u16(record, reduced::VLL)?);
        }
        BinaryLayout::Signature => {
            out.push(scalar_u8(record, signature::SIG)?);
            out.push(scalar_u8(record, signature::SRT)?);
            out.push(scalar_u8(record, signature::ISR)?);
            be::put_u16(out, scalar_u16(record, signature::HLL)?);
            be::put_u16(out, scalar_u16(record, signature::VLL)?);
        }
    }

    out.extend_from_slice(&data);
    Ok(())
}

/// A one-byte scalar from a stored decimal text field.
fn scalar_u8(record: &Record, field_id: u16) -> Result<u8, CodecError> {
    let value = record
        .int(field_id)
        .map_err(CodecError::Type)?
        .ok_or(CodecError::UnserializableField { field_id })?;
    u8::try_from(value).map_err(|_| CodecError::UnserializableField { field_id })
}

/// A two-byte scalar from a stored decimal text field.
fn scalar_u16(record: &Record, field_id: u16) -> Result<u16, CodecError> {
    let value = record
        .int(field_id)
        .map_err(CodecError::Type)?
        .ok_or(CodecError::UnserializableField { field_id })?;
    u16::try_from(value).map_err(|_| CodecError::UnserializableField { field_id })
}

/// The six FGP bytes, exactly.
fn finger_positions(record: &Record, field_id: u16) -> Result<[u8; 6], CodecError> {
    let bytes = record
        .image(field_id)
        .map_err(CodecError::Type)?
        .ok_or(CodecError::UnserializableField { field_id })?;
    <[u8; 6]>::try_from(bytes.as_slice())
        .map_err(|_| CodecError::UnserializableField { field_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grayscale_record(data: Vec<u8>) -> Record {
        let mut fields = BTreeMap::new();
        fields.insert(1, Field::text("0"));
        fields.insert(2, Field::text("1"));
        fields.insert(grayscale::IMP, Field::text("3"));
        fields.insert(
            grayscale::FGP,
            Field::image(vec![2, 255, 255, 255, 255, 255]),
        );
        fields.insert(grayscale::ISR, Field::text("1"));
        fields.insert(grayscale::HLL, Field::text("800"));
        fields.insert(grayscale::VLL, Field::text("750"));
        fields.insert(grayscale::GCA, Field::text("1"));
        fields.insert(grayscale::DATA, Field::image(data));
        Record::new(RecordType::HighResolutionGrayscale, fields)
    }

    #[test]
    fn roundtrip_grayscale() {
        let record = grayscale_record(vec![0xAB; 64]);
        let mut out = Vec::new();
        write(&mut out, &record).unwrap();
        assert_eq!(out.len(), 18 + 64);
        assert_eq!(be::read_u32(&out, 0).unwrap(), 82);

        let mut cursor = Cursor::new(&out);
        let parsed = read(&mut cursor, RecordType::HighResolutionGrayscale).unwrap();
        assert_eq!(parsed.int(2).unwrap(), Some(1));
        assert_eq!(parsed.int(grayscale::HLL).unwrap(), Some(800));
        assert_eq!(parsed.int(grayscale::VLL).unwrap(), Some(750));
        assert_eq!(
            parsed.image(grayscale::FGP).unwrap(),
            Some(vec![2, 255, 255, 255, 255, 255])
        );
        assert_eq!(parsed.image(grayscale::DATA).unwrap(), Some(vec![0xAB; 64]));
        assert_eq!(parsed.declared_len().unwrap(), 82);

        // Byte-identical second pass.
        let mut again = Vec::new();
        write(&mut again, &parsed).unwrap();
        assert_eq!(again, out);
    }

    #[test]
    fn roundtrip_signature() {
        let mut fields = BTreeMap::new();
        fields.insert(1, Field::text("0"));
        fields.insert(2, Field::text("2"));
        fields.insert(signature::SIG, Field::text("0"));
        fields.insert(signature::SRT, Field::text("0"));
        fields.insert(signature::ISR, Field::text("1"));
        fields.insert(signature::HLL, Field::text("620"));
        fields.insert(signature::VLL, Field::text("128"));
        fields.insert(signature::DATA, Field::image(vec![0x0F; 10]));
        let record = Record::new(RecordType::Signature, fields);

        let mut out = Vec::new();
        write(&mut out, &record).unwrap();
        assert_eq!(out.len(), 12 + 10);

        let mut cursor = Cursor::new(&out);
        let parsed = read(&mut cursor, RecordType::Signature).unwrap();
        assert_eq!(parsed.int(signature::HLL).unwrap(), Some(620));
        assert_eq!(parsed.image(signature::DATA).unwrap(), Some(vec![0x0F; 10]));
    }

    #[test]
    fn truncated_data_clamps() {
        let record = grayscale_record(vec![0xCD; 100]);
        let mut out = Vec::new();
        write(&mut out, &record).unwrap();

        // Keep the prefix and only 30 of the 100 DATA bytes.
        let mut cursor = Cursor::new(&out[..18 + 30]);
        let parsed = read(&mut cursor, RecordType::HighResolutionGrayscale).unwrap();
        assert_eq!(parsed.image(grayscale::DATA).unwrap().unwrap().len(), 30);
        // Declared LEN is preserved as read, not rewritten to the clamp.
        assert_eq!(parsed.declared_len().unwrap(), 118);
    }

    #[test]
    fn len_below_prefix_is_malformed() {
        let mut out = vec![0u8; 18];
        // LEN = 10 < 18.
        out[3] = 10;
        let mut cursor = Cursor::new(&out);
        assert!(matches!(
            read(&mut cursor, RecordType::HighResolutionGrayscale),
            Err(CodecError::MalformedFraming {
                detail: "LEN shorter than the fixed prefix",
                offset: 0
            })
        ));
    }

    #[test]
    fn short_prefix_is_eof() {
        let out = vec![0u8; 9];
        let mut cursor = Cursor::new(&out);
        assert!(matches!(
            read(&mut cursor, RecordType::HighResolutionGrayscale),
            Err(CodecError::UnexpectedEndOfInput { offset: 0 })
        ));
    }

    #[test]
    fn missing_roster_field_is_unserializable() {
        let mut fields = BTreeMap::new();
        fields.insert(1, Field::text("0"));
        fields.insert(2, Field::text("1"));
        fields.insert(grayscale::DATA, Field::image(vec![]));
        let record = Record::new(RecordType::HighResolutionGrayscale, fields);

        let mut out = Vec::new();
        assert!(matches!(
            write(&mut out, &record),
            Err(CodecError::UnserializableField {
                field_id: grayscale::IMP
            })
        ));
    }

    #[test]
    fn reduced_layout_width() {
        let mut fields = BTreeMap::new();
        fields.insert(1, Field::text("0"));
        fields.insert(2, Field::text("4"));
        fields.insert(reduced::IMP, Field::text("0"));
        fields.insert(reduced::ISR, Field::text("0"));
        fields.insert(reduced::HLL, Field::text("250"));
        fields.insert(reduced::VLL, Field::text("300"));
        fields.insert(reduced::DATA, Field::image(vec![1, 2, 3]));
        let record = Record::new(RecordType::LowResolutionBinary, fields);

        let mut out = Vec::new();
        write(&mut out, &record).unwrap();
        assert_eq!(out.len(), 11 + 3);

        let mut cursor = Cursor::new(&out);
        let parsed = read(&mut cursor, RecordType::LowResolutionBinary).unwrap();
        assert_eq!(parsed.int(reduced::VLL).unwrap(), Some(300));
        assert_eq!(parsed.image(reduced::DATA).unwrap(), Some(vec![1, 2, 3]));
    }
}
