//! File writer facade.
//!
//! Walks the record map in type-tag order — Type-1 first, then 2, 3, …
//! with each type's records in stored order — dispatching every record
//! to its framing handler. LEN fields are recomputed during the walk,
//! so records decoded from a well-formed file serialize byte-
//! identically and rebuilt ones come out self-consistent.
//!
//! Type-1 itself is always encoded under CP1256 (ASCII-transparent, and
//! what the reader's initial decoder expects); the charset its
//! domain-of-use field names applies to every record after it.

use std::io::Write;

use an2k_types::catalog::transaction;
use an2k_types::file::An2kFile;
use an2k_types::record_type::Framing;
use an2k_wire::Charset;

use crate::error::CodecError;
use crate::{binary, tagged};

pub struct An2kWriter;

impl An2kWriter {
    /// Serialize `file` into a byte vector.
    ///
    /// # Errors
    ///
    /// [`CodecError::UnserializableField`] when a binary-framed record
    /// is missing roster fields or holds out-of-range values.
    pub fn to_bytes(file: &An2kFile) -> Result<Vec<u8>, CodecError> {
        let transaction_record = file.transaction_information();
        let charset =
            Charset::from_domain(transaction_record.text(transaction::VERSION)?.as_deref());

        let mut out = Vec::new();
        tagged::write(&mut out, transaction_record, Charset::Cp1256)?;

        for record in file.non_transaction() {
            match record.record_type().framing() {
                Framing::Tagged { .. } => tagged::write(&mut out, record, charset)?,
                Framing::Binary(_) => binary::write(&mut out, record)?,
            }
        }
        Ok(out)
    }

    /// Serialize `file` into `sink`.
    ///
    /// No internal buffering beyond the sink's own; the caller owns the
    /// sink and releases it on every exit path.
    ///
    /// # Errors
    ///
    /// As [`to_bytes`](Self::to_bytes), plus [`CodecError::Io`].
    pub fn write(sink: &mut impl Write, file: &An2kFile) -> Result<(), CodecError> {
        let bytes = Self::to_bytes(file)?;
        sink.write_all(&bytes)?;
        Ok(())
    }
}
