use std::collections::BTreeMap;

use crate::error::TypeError;
use crate::record::Record;
use crate::record_type::RecordType;

/// A complete transaction file: the record map, keyed by type tag.
///
/// The map is ordered by tag, and each tag holds its records in
/// insertion order — together that is the serialization order (Type-1
/// first, then ascending type, stored order within a type), and the
/// order the content directory enumerates.
///
/// Invariants, enforced by [`An2kFile::from_records`]:
/// - exactly one Type-1 record, serialized first;
/// - every tag present exists in the taxonomy.
///
/// The file is immutable after construction; the Type-1 content
/// directory is only guaranteed correct for files emitted by the file
/// builder or the reader, never for an ad-hoc map.
#[derive(Clone, Debug, PartialEq)]
pub struct An2kFile {
    records: BTreeMap<u8, Vec<Record>>,
}

impl An2kFile {
    /// Assemble a file from a record map, validating the invariants.
    ///
    /// Empty per-tag lists are dropped rather than kept as ghosts.
    ///
    /// # Errors
    ///
    /// - [`TypeError::UnknownRecordType`] if a key is outside 1..=17 or a
    ///   stored record's type disagrees with its key.
    /// - [`TypeError::MissingTransactionRecord`] /
    ///   [`TypeError::DuplicateTransactionRecord`] for a wrong Type-1
    ///   count.
    pub fn from_records(records: BTreeMap<u8, Vec<Record>>) -> Result<Self, TypeError> {
        let mut cleaned: BTreeMap<u8, Vec<Record>> = BTreeMap::new();
        for (tag, list) in records {
            let record_type = RecordType::from_tag(tag)?;
            if list.is_empty() {
                continue;
            }
            for record in &list {
                if record.record_type() != record_type {
                    return Err(TypeError::UnknownRecordType { tag });
                }
            }
            cleaned.insert(tag, list);
        }

        match cleaned.get(&1).map_or(0, Vec::len) {
            0 => Err(TypeError::MissingTransactionRecord),
            1 => Ok(Self { records: cleaned }),
            count => Err(TypeError::DuplicateTransactionRecord { count }),
        }
    }

    /// All records of one type, in stored order. Empty for absent types.
    pub fn records_of(&self, record_type: RecordType) -> &[Record] {
        self.records
            .get(&record_type.tag())
            .map_or(&[], Vec::as_slice)
    }

    /// The unique record with the given type and IDC, if any.
    pub fn record_of(&self, record_type: RecordType, idc: u32) -> Option<&Record> {
        self.records_of(record_type)
            .iter()
            .find(|r| r.idc() == idc)
    }

    /// The Type-1 transaction information record.
    ///
    /// Guaranteed present by the construction invariant.
    pub fn transaction_information(&self) -> &Record {
        &self.records[&1][0]
    }

    /// Every record in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values().flatten()
    }

    /// Every record except Type-1, in serialization order. This is the
    /// list the content directory enumerates.
    pub fn non_transaction(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|&(&tag, _)| tag != 1)
            .flat_map(|(_, list)| list)
    }

    /// Total record count, Type-1 included.
    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }
}
