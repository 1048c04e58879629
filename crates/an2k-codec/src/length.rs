//! Record length calculation.
//!
//! Every record's field 1 (LEN) covers the whole record's serialized
//! byte count. Binary-framed records are trivial: fixed prefix plus
//! DATA. Text-tagged records are self-referential — LEN's own textual
//! width contributes to the total — so the calculation runs a digit
//! carry check instead of a fixed-point loop.
//!
//! The per-field prefix budget counts `GS ++ "{type}.{id:03}:"`. The
//! wire actually separates fields with FS, not GS, but both are one
//! byte, so the accounting is correct. This mirrors the accounting of
//! the implementations already in circulation and must not be "fixed".

use an2k_types::record::Record;
use an2k_types::record_type::BinaryLayout;
use an2k_wire::Charset;

use crate::error::CodecError;

/// Number of decimal digits in `n` (1 for 0).
pub fn digits(n: u64) -> u64 {
    if n == 0 {
        return 1;
    }
    let mut n = n;
    let mut count = 0;
    while n > 0 {
        n /= 10;
        count += 1;
    }
    count
}

/// Prefix budget for one field: separator byte + `"{tag}.{id:03}:"`.
pub fn prefix_len(tag: u8, field_id: u16) -> u64 {
    // GS + tag digits + '.' + 3-digit field id + ':'
    1 + digits(u64::from(tag)) + 1 + 3.max(digits(u64::from(field_id))) + 1
}

/// Serialized byte length of a text-tagged record, LEN included.
///
/// 1. `S` = every non-LEN field's payload length plus its prefix.
/// 2. `d` = digits of `S`; tentative total `L = S + d + P(1)`.
/// 3. If writing `L` itself needs one digit more than `d`, add the
///    carry byte.
pub fn tagged_len(record: &Record, charset: Charset) -> u64 {
    let tag = record.record_type().tag();
    let s: u64 = record
        .fields()
        .filter(|&(id, _)| id != 1)
        .map(|(id, field)| u64::from(field.length_bytes(charset)) + prefix_len(tag, id))
        .sum();

    let d = digits(s);
    let mut len = s + d + prefix_len(tag, 1);
    if digits(len) > d {
        len += 1;
    }
    len
}

/// Serialized byte length of a binary-framed record.
///
/// # Errors
///
/// [`CodecError::UnserializableField`] if the DATA payload pushes the
/// total past the 4-byte LEN slot.
pub fn binary_len(layout: BinaryLayout, data_len: usize) -> Result<u32, CodecError> {
    u32::try_from(layout.fixed_size() + data_len)
        .map_err(|_| CodecError::UnserializableField { field_id: 1 })
}
