use std::collections::BTreeMap;

use crate::catalog;
use crate::error::TypeError;
use crate::field::Field;
use crate::record_type::RecordType;

/// One logical record: a type tag and its fields, keyed by 1-based id.
///
/// The map is a `BTreeMap` on purpose — ascending field-id iteration is
/// the serialization order of text-tagged records, and byte-exact
/// round-trips depend on it. Field 1 is always LEN, field 2 IDC.
///
/// Records are immutable once constructed: the reader and the builders
/// both assemble the map first and hand it over whole. To modify a
/// record, seed a fresh builder from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    record_type: RecordType,
    fields: BTreeMap<u16, Field>,
}

impl Record {
    pub fn new(record_type: RecordType, fields: BTreeMap<u16, Field>) -> Self {
        Self {
            record_type,
            fields,
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Fields in ascending id order.
    pub fn fields(&self) -> impl Iterator<Item = (u16, &Field)> {
        self.fields.iter().map(|(&id, field)| (id, field))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, field_id: u16) -> Option<&Field> {
        self.fields.get(&field_id)
    }

    pub fn has_field(&self, field_id: u16) -> bool {
        self.fields.contains_key(&field_id)
    }

    /// Text value of a field.
    ///
    /// Returns `Ok(None)` when the field is absent.
    ///
    /// # Errors
    ///
    /// [`TypeError::FieldTypeMismatch`] if the field holds image bytes.
    pub fn text(&self, field_id: u16) -> Result<Option<String>, TypeError> {
        match self.fields.get(&field_id) {
            None => Ok(None),
            Some(field) => field.expect_text(field_id).map(|s| Some(s.to_owned())),
        }
    }

    /// Image bytes of a field, deep-copied on egress so callers cannot
    /// corrupt the stored payload.
    ///
    /// # Errors
    ///
    /// [`TypeError::FieldTypeMismatch`] if the field holds text.
    pub fn image(&self, field_id: u16) -> Result<Option<Vec<u8>>, TypeError> {
        match self.fields.get(&field_id) {
            None => Ok(None),
            Some(field) => field.expect_image(field_id).map(|b| Some(b.to_vec())),
        }
    }

    /// Integer value of a text field. Non-numeric text reads as `None`.
    ///
    /// # Errors
    ///
    /// [`TypeError::FieldTypeMismatch`] if the field holds image bytes.
    pub fn int(&self, field_id: u16) -> Result<Option<u64>, TypeError> {
        match self.fields.get(&field_id) {
            None => Ok(None),
            Some(field) => {
                let text = field.expect_text(field_id)?;
                Ok(text.trim().parse::<u64>().ok())
            }
        }
    }

    /// The IDC (field 2) as a number, or 0 when absent or non-numeric.
    /// This is the value the content directory rows carry.
    pub fn idc(&self) -> u32 {
        self.int(catalog::IDC)
            .ok()
            .flatten()
            .map_or(0, |v| u32::try_from(v).unwrap_or(0))
    }

    /// The LEN (field 1) as declared, if present and numeric.
    pub fn declared_len(&self) -> Option<u64> {
        self.int(catalog::LEN).ok().flatten()
    }
}
