//! The generic record builder every typed builder delegates to.

use std::collections::BTreeMap;

use an2k_codec::length;
use an2k_image::{ImageInfo, probe};
use an2k_types::catalog::{self, grayscale, reduced, signature, tagged_image};
use an2k_types::field::Field;
use an2k_types::record::Record;
use an2k_types::record_type::{BinaryLayout, Framing, RecordType};
use an2k_wire::Charset;

use crate::error::BuildError;

/// Mutable construction scaffold for a single record.
///
/// Setters accumulate fields; nothing is validated or derived until
/// [`build`](Self::build), which checks every id against the type's
/// catalog, runs the image prober when `calculate_fields` is on, fills
/// layout defaults for binary records, and finally computes LEN. The
/// emitted [`Record`] is immutable — to change one, seed a new builder
/// with [`from_record`](Self::from_record).
///
/// Builders are single-actor: not `Sync`, not meant to be shared.
pub struct RecordBuilder {
    record_type: RecordType,
    fields: BTreeMap<u16, Field>,
    calculate: bool,
    charset: Charset,
}

impl RecordBuilder {
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            fields: BTreeMap::new(),
            calculate: false,
            charset: Charset::Cp1256,
        }
    }

    /// Seed a builder with a deep copy of an existing record's fields.
    pub fn from_record(record: &Record) -> Self {
        Self {
            record_type: record.record_type(),
            fields: record
                .fields()
                .map(|(id, field)| (id, field.clone()))
                .collect(),
            calculate: false,
            charset: Charset::Cp1256,
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Set a text field.
    #[must_use]
    pub fn text(mut self, field_id: u16, value: impl Into<String>) -> Self {
        self.fields.insert(field_id, Field::text(value));
        self
    }

    /// Set an image (opaque bytes) field.
    #[must_use]
    pub fn image(mut self, field_id: u16, bytes: impl Into<Vec<u8>>) -> Self {
        self.fields.insert(field_id, Field::image(bytes));
        self
    }

    /// Enable derived-field calculation from the attached image data.
    #[must_use]
    pub fn calculate_fields(mut self, on: bool) -> Self {
        self.calculate = on;
        self
    }

    /// Charset used for the LEN computation of text-tagged records.
    /// The file builder re-derives LEN under the file's own charset, so
    /// this matters mostly for records built standalone.
    #[must_use]
    pub fn charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Finalize the record.
    ///
    /// # Errors
    ///
    /// - [`BuildError::FieldOutsideCatalog`] for an id the type does not
    ///   declare.
    /// - [`BuildError::Probe`] when `calculate_fields` is on and the
    ///   attached image data has an unrecognized or truncated header.
    pub fn build(mut self) -> Result<Record, BuildError> {
        for &field_id in self.fields.keys() {
            if field_id != catalog::LEN && !catalog::allows(self.record_type, field_id) {
                return Err(BuildError::FieldOutsideCatalog {
                    tag: self.record_type.tag(),
                    field_id,
                });
            }
        }

        if self.calculate {
            self.derive_from_image()?;
        }

        if let Framing::Binary(layout) = self.record_type.framing() {
            self.fill_binary_defaults(layout);
        }

        // LEN last: it depends on every other field.
        let record = Record::new(self.record_type, self.fields);
        Ok(with_recomputed_len(&record, self.charset)?)
    }

    /// Probe the attached DATA payload and fill — only where unset —
    /// the compression, geometry, density and color fields.
    fn derive_from_image(&mut self) -> Result<(), BuildError> {
        let Some(data_field) = catalog::image_data_field(self.record_type) else {
            return Ok(());
        };
        let Some(Field::Image(data)) = self.fields.get(&data_field) else {
            return Ok(());
        };
        let info = probe(data)?;

        match self.record_type.framing() {
            Framing::Tagged { .. } => self.fill_tagged_derived(&info),
            Framing::Binary(layout) => self.fill_binary_derived(layout, &info),
        }
        Ok(())
    }

    fn fill_tagged_derived(&mut self, info: &ImageInfo) {
        self.set_if_unset(tagged_image::CGA, info.compression.label().to_owned());
        self.set_if_unset(tagged_image::HLL, info.width.to_string());
        self.set_if_unset(tagged_image::VLL, info.height.to_string());
        if info.ppi_x > 0 {
            self.set_if_unset(tagged_image::HPS, info.ppi_x.to_string());
        }
        if info.ppi_y > 0 {
            self.set_if_unset(tagged_image::VPS, info.ppi_y.to_string());
        }
        // Type-10 records carry a colorspace; the other tagged image
        // types carry a pixel depth in the same slot.
        if self.record_type == RecordType::FacialSmtImage {
            self.set_if_unset(tagged_image::CSP, info.colorspace.label().to_owned());
        } else {
            self.set_if_unset(tagged_image::BPX, info.depth.to_string());
        }
    }

    fn fill_binary_derived(&mut self, layout: BinaryLayout, info: &ImageInfo) {
        match layout {
            BinaryLayout::Grayscale => {
                self.set_if_unset(grayscale::HLL, info.width.to_string());
                self.set_if_unset(grayscale::VLL, info.height.to_string());
                self.set_if_unset(grayscale::GCA, info.compression.code().to_string());
            }
            BinaryLayout::Reduced => {
                self.set_if_unset(reduced::HLL, info.width.to_string());
                self.set_if_unset(reduced::VLL, info.height.to_string());
            }
            BinaryLayout::Signature => {
                self.set_if_unset(signature::HLL, info.width.to_string());
                self.set_if_unset(signature::VLL, info.height.to_string());
            }
        }
    }

    /// Binary layouts are fixed-width: every roster slot must hold a
    /// value at serialization time, so unset slots get their zero
    /// defaults (and FGP its six unused-position markers).
    fn fill_binary_defaults(&mut self, layout: BinaryLayout) {
        let scalar_ids: &[u16] = match layout {
            BinaryLayout::Grayscale => &[2, 3, 5, 6, 7, 8],
            BinaryLayout::Reduced => &[2, 3, 4, 5, 6],
            BinaryLayout::Signature => &[2, 3, 4, 5, 6, 7],
        };
        for &id in scalar_ids {
            self.set_if_unset(id, "0".to_owned());
        }
        if layout == BinaryLayout::Grayscale && !self.fields.contains_key(&grayscale::FGP) {
            self.fields
                .insert(grayscale::FGP, Field::image(vec![255u8; 6]));
        }
        let data_field = layout_data_field(layout);
        if !self.fields.contains_key(&data_field) {
            self.fields.insert(data_field, Field::image(Vec::new()));
        }
    }

    fn set_if_unset(&mut self, field_id: u16, value: String) {
        self.fields
            .entry(field_id)
            .or_insert_with(|| Field::text(value));
    }
}

fn layout_data_field(layout: BinaryLayout) -> u16 {
    match layout {
        BinaryLayout::Grayscale => grayscale::DATA,
        BinaryLayout::Reduced => reduced::DATA,
        BinaryLayout::Signature => signature::DATA,
    }
}

/// Rebuild `record` with field 1 set to its computed serialized length.
///
/// # Errors
///
/// [`an2k_codec::CodecError::UnserializableField`] for a binary record
/// whose DATA is missing or oversized.
pub(crate) fn with_recomputed_len(
    record: &Record,
    charset: Charset,
) -> Result<Record, an2k_codec::CodecError> {
    let len = match record.record_type().framing() {
        Framing::Tagged { .. } => length::tagged_len(record, charset),
        Framing::Binary(layout) => {
            let data_field = layout_data_field(layout);
            let data = record
                .image(data_field)?
                .ok_or(an2k_codec::CodecError::UnserializableField {
                    field_id: data_field,
                })?;
            u64::from(length::binary_len(layout, data.len())?)
        }
    };

    let mut fields: BTreeMap<u16, Field> = record
        .fields()
        .map(|(id, field)| (id, field.clone()))
        .collect();
    fields.insert(catalog::LEN, Field::text(len.to_string()));
    Ok(Record::new(record.record_type(), fields))
}
