//! File reader facade.
//!
//! The reader buffers its entire input — the format is not streamable,
//! because the Type-1 content directory drives dispatch and the active
//! charset is only known once Type-1 has been parsed. Decoding then
//! proceeds in three steps:
//!
//! ```text
//! 1. Type-1      — parsed first, under the initial CP1256 decoder.
//! 2. Charset     — domain-of-use (field 4) pins the cursor's charset
//!                  for every record that follows.
//! 3. Directory   — CNT rows 2..N dispatch each record to its framing
//!                  handler, which advances the shared cursor.
//! ```
//!
//! The raw buffer is retained after decoding for the base64 and SHA-256
//! conveniences.

use std::collections::BTreeMap;
use std::io::Read;

use an2k_types::catalog::transaction;
use an2k_types::file::An2kFile;
use an2k_types::record::Record;
use an2k_types::record_type::{Framing, RecordType};
use an2k_wire::Charset;
use an2k_wire::digest;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::cursor::Cursor;
use crate::error::CodecError;
use crate::{binary, content, tagged};

/// Buffered reader over one transaction file.
pub struct An2kReader {
    buf: Vec<u8>,
}

impl An2kReader {
    /// Buffer the full contents of `source`.
    ///
    /// # Errors
    ///
    /// [`CodecError::Io`] if reading fails. The caller owns the source
    /// and is responsible for releasing it on every exit path.
    pub fn read(mut source: impl Read) -> Result<Self, CodecError> {
        let mut buf = Vec::new();
        source.read_to_end(&mut buf)?;
        Ok(Self { buf })
    }

    /// Wrap an already in-memory payload.
    pub fn from_bytes(buf: Vec<u8>) -> Self {
        Self { buf }
    }

    /// The raw bytes as ingested.
    pub fn raw(&self) -> &[u8] {
        &self.buf
    }

    /// Base64 of the raw buffer (standard alphabet, padded).
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.buf)
    }

    /// Lowercase hex SHA-256 of the raw buffer.
    pub fn sha256_hex(&self) -> String {
        digest::sha256_hex(&self.buf)
    }

    /// Decode the buffered payload into a record tree.
    ///
    /// # Errors
    ///
    /// Any [`CodecError`]; see the crate error ladder. The one
    /// tolerance is DATA truncation against a declared LEN.
    pub fn decode(&self) -> Result<An2kFile, CodecError> {
        decode(&self.buf)
    }
}

/// Decode an in-memory payload into a record tree.
///
/// # Errors
///
/// - [`CodecError::UnexpectedEndOfInput`] when the buffer ends with
///   directory entries still unread.
/// - [`CodecError::MalformedFraming`] for broken record framing.
/// - `UnknownRecordType` (via [`CodecError::Type`]) for directory rows
///   naming tags outside the taxonomy.
pub fn decode(bytes: &[u8]) -> Result<An2kFile, CodecError> {
    let mut cursor = Cursor::new(bytes);

    let transaction_record = tagged::read(&mut cursor, RecordType::TransactionInformation)?;

    // Everything after Type-1 decodes under the discovered charset.
    let domain = transaction_record.text(transaction::VERSION)?;
    cursor.set_charset(Charset::from_domain(domain.as_deref()));

    let directory = transaction_record
        .text(transaction::FILE_CONTENT)?
        .unwrap_or_default();
    let entries = content::parse(&directory)?;

    let mut records: BTreeMap<u8, Vec<Record>> = BTreeMap::new();
    records.insert(1, vec![transaction_record]);

    for &(tag, _idc) in entries.iter().skip(1) {
        let record_type = RecordType::from_tag(tag)?;
        if cursor.is_at_end() {
            return Err(CodecError::UnexpectedEndOfInput {
                offset: cursor.position(),
            });
        }
        let record = match record_type.framing() {
            Framing::Tagged { .. } => tagged::read(&mut cursor, record_type)?,
            Framing::Binary(_) => binary::read(&mut cursor, record_type)?,
        };
        records.entry(tag).or_default().push(record);
    }

    An2kFile::from_records(records).map_err(CodecError::Type)
}
