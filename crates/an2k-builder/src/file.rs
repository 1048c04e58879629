//! The file-level builder: assembles records into a valid transaction.
//!
//! `build()` is where the file-wide invariants are established, in one
//! pass:
//!
//! ```text
//! 1. Assemble the record map and validate it (Type-1 exactly once,
//!    taxonomy membership).
//! 2. Compute the content directory from the non-Type-1 records and
//!    write it into Type-1 field 3.
//! 3. Recompute every record's LEN under the file's charset — last of
//!    all Type-1's, whose LEN depends on the directory. One pass
//!    suffices: the directory does not depend on Type-1's own LEN.
//! ```

use std::collections::BTreeMap;

use an2k_codec::content;
use an2k_types::catalog::transaction;
use an2k_types::field::Field;
use an2k_types::file::An2kFile;
use an2k_types::record::Record;
use an2k_types::record_type::RecordType;
use an2k_wire::Charset;

use crate::error::BuildError;
use crate::record::with_recomputed_len;

/// Fluent builder for a complete transaction file.
#[derive(Default)]
pub struct FileBuilder {
    transaction: Option<Record>,
    records: Vec<Record>,
}

impl FileBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The Type-1 transaction information record. Its content directory
    /// (field 3) is overwritten at `build()`.
    #[must_use]
    pub fn transaction(mut self, record: Record) -> Self {
        self.transaction = Some(record);
        self
    }

    /// Append a content record (any type but 1).
    #[must_use]
    pub fn record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    /// Finalize the file, computing the content directory and LEN
    /// fields.
    ///
    /// # Errors
    ///
    /// - [`BuildError::MissingTransactionRecord`] without a Type-1.
    /// - [`BuildError::MisplacedRecord`] for a Type-1 added via
    ///   [`record`](Self::record) or a non-Type-1 via
    ///   [`transaction`](Self::transaction).
    /// - [`BuildError::Codec`] for a binary record that cannot be
    ///   measured.
    pub fn build(self) -> Result<An2kFile, BuildError> {
        let transaction_record = self
            .transaction
            .ok_or(BuildError::MissingTransactionRecord)?;
        if transaction_record.record_type() != RecordType::TransactionInformation {
            return Err(BuildError::MisplacedRecord {
                tag: transaction_record.record_type().tag(),
            });
        }

        let charset = Charset::from_domain(
            transaction_record
                .text(transaction::VERSION)?
                .as_deref(),
        );

        let mut map: BTreeMap<u8, Vec<Record>> = BTreeMap::new();
        map.insert(1, vec![transaction_record]);
        for record in self.records {
            let tag = record.record_type().tag();
            if record.record_type() == RecordType::TransactionInformation {
                return Err(BuildError::MisplacedRecord { tag });
            }
            // Content records get their LEN pinned under the file's
            // charset before the directory is derived.
            let record = with_recomputed_len(&record, charset)?;
            map.entry(tag).or_default().push(record);
        }

        let provisional = An2kFile::from_records(map)?;
        let entries = content::directory_entries(&provisional);
        let directory = content::render(&entries);

        // Rebuild Type-1: inject the directory, then recompute its LEN.
        // Type-1 always serializes under CP1256, so its length is
        // computed the same way.
        let mut fields: BTreeMap<u16, Field> = provisional
            .transaction_information()
            .fields()
            .map(|(id, field)| (id, field.clone()))
            .collect();
        fields.insert(transaction::FILE_CONTENT, Field::text(directory));
        let rebuilt = with_recomputed_len(
            &Record::new(RecordType::TransactionInformation, fields),
            Charset::Cp1256,
        )?;

        let mut map: BTreeMap<u8, Vec<Record>> = BTreeMap::new();
        map.insert(1, vec![rebuilt]);
        for record in provisional.non_transaction() {
            map.entry(record.record_type().tag())
                .or_default()
                .push(record.clone());
        }
        An2kFile::from_records(map).map_err(BuildError::Type)
    }
}

#[cfg(test)]
mod tests {
    use an2k_codec::{An2kWriter, decode};

    use super::*;
    use crate::typed::{DescriptiveTextBuilder, TransactionBuilder};

    fn transaction_record() -> Record {
        TransactionBuilder::new()
            .with_version("0300")
            .with_transaction_type("CRM")
            .with_originating_agency("ORI042")
            .build()
            .unwrap()
    }

    #[test]
    fn directory_and_len_are_computed() {
        let file = FileBuilder::new()
            .transaction(transaction_record())
            .record(
                DescriptiveTextBuilder::new()
                    .with_idc("1")
                    .with_field(5, "CRM")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let t1 = file.transaction_information();
        let directory = t1.text(transaction::FILE_CONTENT).unwrap().unwrap();
        assert_eq!(directory, "1\u{1F}1\u{1E}2\u{1F}1");

        // Serialized Type-1 length equals the declared LEN.
        let bytes = An2kWriter::to_bytes(&file).unwrap();
        let reread = decode(&bytes).unwrap();
        assert_eq!(
            reread.transaction_information().declared_len(),
            t1.declared_len()
        );
    }

    #[test]
    fn missing_transaction_rejected() {
        assert!(matches!(
            FileBuilder::new().build(),
            Err(BuildError::MissingTransactionRecord)
        ));
    }

    #[test]
    fn type1_as_content_rejected() {
        let result = FileBuilder::new()
            .transaction(transaction_record())
            .record(transaction_record())
            .build();
        assert!(matches!(result, Err(BuildError::MisplacedRecord { tag: 1 })));
    }

    #[test]
    fn content_as_transaction_rejected() {
        let type2 = DescriptiveTextBuilder::new().with_idc("1").build().unwrap();
        let result = FileBuilder::new().transaction(type2).build();
        assert!(matches!(result, Err(BuildError::MisplacedRecord { tag: 2 })));
    }

    #[test]
    fn built_file_roundtrips() {
        let file = FileBuilder::new()
            .transaction(transaction_record())
            .record(
                DescriptiveTextBuilder::new()
                    .with_idc("1")
                    .with_field(9, "subject record")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let bytes = An2kWriter::to_bytes(&file).unwrap();
        let reread = decode(&bytes).unwrap();
        assert_eq!(reread, file);
    }
}
