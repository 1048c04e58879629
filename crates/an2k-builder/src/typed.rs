//! Semantic builders, one per record-type family.
//!
//! Thin wrappers over [`RecordBuilder`]: each `with_*` setter maps a
//! domain concept onto its field id, so call sites read like the
//! transaction they describe rather than like a field-id table.

use an2k_types::catalog::{grayscale, reduced, signature, tagged_image, transaction};
use an2k_types::record::Record;
use an2k_types::record_type::{BinaryLayout, Framing, RecordType};

use crate::error::BuildError;
use crate::record::RecordBuilder;

/// Builder for the Type-1 transaction information record.
///
/// The file-content directory (field 3) is never set here — the file
/// builder computes and injects it at `build()` time.
pub struct TransactionBuilder {
    inner: RecordBuilder,
}

impl TransactionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RecordBuilder::new(RecordType::TransactionInformation),
        }
    }

    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            inner: RecordBuilder::from_record(record),
        }
    }

    /// Version / domain-of-use indicator (field 4). Also selects the
    /// charset of every record after Type-1 — `"002…"` reads UTF-16,
    /// `"003…"` UTF-8, anything else CP1256.
    #[must_use]
    pub fn with_version(self, version: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(transaction::VERSION, version),
        }
    }

    #[must_use]
    pub fn with_transaction_type(self, tot: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(transaction::TYPE_OF_TRANSACTION, tot),
        }
    }

    #[must_use]
    pub fn with_date(self, date: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(transaction::DATE, date),
        }
    }

    #[must_use]
    pub fn with_destination_agency(self, agency: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(transaction::DESTINATION_AGENCY, agency),
        }
    }

    #[must_use]
    pub fn with_originating_agency(self, agency: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(transaction::ORIGINATING_AGENCY, agency),
        }
    }

    /// Transaction control number (field 9), usually from
    /// [`crate::generate_agency_tcn`].
    #[must_use]
    pub fn with_control_number(self, tcn: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(transaction::CONTROL_NUMBER, tcn),
        }
    }

    #[must_use]
    pub fn with_priority(self, priority: u8) -> Self {
        Self {
            inner: self
                .inner
                .text(transaction::PRIORITY, priority.to_string()),
        }
    }

    #[must_use]
    pub fn with_domain_name(self, domain: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(transaction::DOMAIN_NAME, domain),
        }
    }

    /// Escape hatch for fields without a dedicated setter.
    #[must_use]
    pub fn with_field(self, field_id: u16, value: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(field_id, value),
        }
    }

    /// # Errors
    ///
    /// See [`RecordBuilder::build`].
    pub fn build(self) -> Result<Record, BuildError> {
        self.inner.build()
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for Type-2 user-defined descriptive text records.
pub struct DescriptiveTextBuilder {
    inner: RecordBuilder,
}

impl DescriptiveTextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RecordBuilder::new(RecordType::DescriptiveText),
        }
    }

    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            inner: RecordBuilder::from_record(record),
        }
    }

    #[must_use]
    pub fn with_idc(self, idc: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(2, idc),
        }
    }

    /// Type-2 fields are agency-defined; everything goes through the
    /// generic setter.
    #[must_use]
    pub fn with_field(self, field_id: u16, value: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(field_id, value),
        }
    }

    /// # Errors
    ///
    /// See [`RecordBuilder::build`].
    pub fn build(self) -> Result<Record, BuildError> {
        self.inner.build()
    }
}

impl Default for DescriptiveTextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for Type-9 minutiae records.
pub struct MinutiaeBuilder {
    inner: RecordBuilder,
}

impl MinutiaeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RecordBuilder::new(RecordType::Minutiae),
        }
    }

    #[must_use]
    pub fn with_idc(self, idc: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(2, idc),
        }
    }

    #[must_use]
    pub fn with_field(self, field_id: u16, value: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(field_id, value),
        }
    }

    /// # Errors
    ///
    /// See [`RecordBuilder::build`].
    pub fn build(self) -> Result<Record, BuildError> {
        self.inner.build()
    }
}

impl Default for MinutiaeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the text-tagged image types (10, 13–17).
pub struct TaggedImageBuilder {
    inner: RecordBuilder,
}

impl TaggedImageBuilder {
    /// `record_type` should be one of the tagged image types; anything
    /// else fails at `build()` when field 999 misses the catalog.
    #[must_use]
    pub fn new(record_type: RecordType) -> Self {
        Self {
            inner: RecordBuilder::new(record_type),
        }
    }

    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            inner: RecordBuilder::from_record(record),
        }
    }

    #[must_use]
    pub fn with_idc(self, idc: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(2, idc),
        }
    }

    #[must_use]
    pub fn with_image_type(self, imt: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(tagged_image::IMAGE_TYPE, imt),
        }
    }

    #[must_use]
    pub fn with_source_agency(self, agency: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(tagged_image::SOURCE_AGENCY, agency),
        }
    }

    #[must_use]
    pub fn with_capture_date(self, date: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(tagged_image::CAPTURE_DATE, date),
        }
    }

    /// The opaque image payload (field 999).
    #[must_use]
    pub fn with_image_data(self, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: self.inner.image(999, bytes),
        }
    }

    #[must_use]
    pub fn with_line_lengths(self, horizontal: u32, vertical: u32) -> Self {
        Self {
            inner: self
                .inner
                .text(tagged_image::HLL, horizontal.to_string())
                .text(tagged_image::VLL, vertical.to_string()),
        }
    }

    #[must_use]
    pub fn with_pixel_density(self, horizontal: u32, vertical: u32) -> Self {
        Self {
            inner: self
                .inner
                .text(tagged_image::HPS, horizontal.to_string())
                .text(tagged_image::VPS, vertical.to_string()),
        }
    }

    #[must_use]
    pub fn with_compression(self, cga: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(tagged_image::CGA, cga),
        }
    }

    /// Colorspace (Type-10's field 12).
    #[must_use]
    pub fn with_colorspace(self, csp: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(tagged_image::CSP, csp),
        }
    }

    /// Pixel depth (field 12 of types 13–17).
    #[must_use]
    pub fn with_pixel_depth(self, bpx: u16) -> Self {
        Self {
            inner: self.inner.text(tagged_image::BPX, bpx.to_string()),
        }
    }

    #[must_use]
    pub fn with_field(self, field_id: u16, value: impl Into<String>) -> Self {
        Self {
            inner: self.inner.text(field_id, value),
        }
    }

    /// Fill compression/geometry/density/color from the image header at
    /// build time, where not already set.
    #[must_use]
    pub fn calculate_fields(self, on: bool) -> Self {
        Self {
            inner: self.inner.calculate_fields(on),
        }
    }

    /// # Errors
    ///
    /// See [`RecordBuilder::build`].
    pub fn build(self) -> Result<Record, BuildError> {
        self.inner.build()
    }
}

/// Builder for the binary fingerprint image types (3–7).
pub struct BinaryImageBuilder {
    inner: RecordBuilder,
    layout: BinaryLayout,
}

impl BinaryImageBuilder {
    /// `record_type` should be one of types 3–7; a tagged type here
    /// fails at `build()` when the roster ids miss its catalog.
    #[must_use]
    pub fn new(record_type: RecordType) -> Self {
        let layout = match record_type.framing() {
            Framing::Binary(layout) => layout,
            Framing::Tagged { .. } => BinaryLayout::Grayscale,
        };
        Self {
            inner: RecordBuilder::new(record_type),
            layout,
        }
    }

    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let layout = match record.record_type().framing() {
            Framing::Binary(layout) => layout,
            Framing::Tagged { .. } => BinaryLayout::Grayscale,
        };
        Self {
            inner: RecordBuilder::from_record(record),
            layout,
        }
    }

    #[must_use]
    pub fn with_idc(self, idc: u8) -> Self {
        let Self { inner, layout } = self;
        Self {
            inner: inner.text(2, idc.to_string()),
            layout,
        }
    }

    #[must_use]
    pub fn with_impression(self, imp: u8) -> Self {
        let Self { inner, layout } = self;
        let id = match layout {
            BinaryLayout::Grayscale => grayscale::IMP,
            BinaryLayout::Reduced => reduced::IMP,
            BinaryLayout::Signature => signature::SIG,
        };
        Self {
            inner: inner.text(id, imp.to_string()),
            layout,
        }
    }

    /// Finger positions, most probable first; unused slots are filled
    /// with the 255 marker. Only meaningful for the Grayscale layout.
    #[must_use]
    pub fn with_finger_positions(self, positions: &[u8]) -> Self {
        let mut fgp = [255u8; 6];
        for (slot, &position) in fgp.iter_mut().zip(positions.iter()) {
            *slot = position;
        }
        let Self { inner, layout } = self;
        Self {
            inner: inner.image(grayscale::FGP, fgp.to_vec()),
            layout,
        }
    }

    #[must_use]
    pub fn with_scanning_resolution(self, isr: u8) -> Self {
        let Self { inner, layout } = self;
        let id = match layout {
            BinaryLayout::Grayscale => grayscale::ISR,
            BinaryLayout::Reduced => reduced::ISR,
            BinaryLayout::Signature => signature::ISR,
        };
        Self {
            inner: inner.text(id, isr.to_string()),
            layout,
        }
    }

    #[must_use]
    pub fn with_line_lengths(self, horizontal: u16, vertical: u16) -> Self {
        let Self { inner, layout } = self;
        let (hll, vll) = match layout {
            BinaryLayout::Grayscale => (grayscale::HLL, grayscale::VLL),
            BinaryLayout::Reduced => (reduced::HLL, reduced::VLL),
            BinaryLayout::Signature => (signature::HLL, signature::VLL),
        };
        Self {
            inner: inner
                .text(hll, horizontal.to_string())
                .text(vll, vertical.to_string()),
            layout,
        }
    }

    /// Grayscale compression code (GCA byte).
    #[must_use]
    pub fn with_compression(self, gca: u8) -> Self {
        let Self { inner, layout } = self;
        Self {
            inner: inner.text(grayscale::GCA, gca.to_string()),
            layout,
        }
    }

    #[must_use]
    pub fn with_image_data(self, bytes: impl Into<Vec<u8>>) -> Self {
        let Self { inner, layout } = self;
        let id = match layout {
            BinaryLayout::Grayscale => grayscale::DATA,
            BinaryLayout::Reduced => reduced::DATA,
            BinaryLayout::Signature => signature::DATA,
        };
        Self {
            inner: inner.image(id, bytes),
            layout,
        }
    }

    #[must_use]
    pub fn calculate_fields(self, on: bool) -> Self {
        let Self { inner, layout } = self;
        Self {
            inner: inner.calculate_fields(on),
            layout,
        }
    }

    /// # Errors
    ///
    /// See [`RecordBuilder::build`].
    pub fn build(self) -> Result<Record, BuildError> {
        self.inner.build()
    }
}

/// Builder for Type-8 signature image records.
pub struct SignatureBuilder {
    inner: BinaryImageBuilder,
}

impl SignatureBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: BinaryImageBuilder::new(RecordType::Signature),
        }
    }

    #[must_use]
    pub fn with_idc(self, idc: u8) -> Self {
        Self {
            inner: self.inner.with_idc(idc),
        }
    }

    /// Signature type: 0 subject, 1 officer.
    #[must_use]
    pub fn with_signature_type(self, sig: u8) -> Self {
        Self {
            inner: self.inner.with_impression(sig),
        }
    }

    #[must_use]
    pub fn with_representation(self, srt: u8) -> Self {
        Self {
            inner: Self::set(self.inner, signature::SRT, srt),
        }
    }

    #[must_use]
    pub fn with_scanning_resolution(self, isr: u8) -> Self {
        Self {
            inner: self.inner.with_scanning_resolution(isr),
        }
    }

    #[must_use]
    pub fn with_line_lengths(self, horizontal: u16, vertical: u16) -> Self {
        Self {
            inner: self.inner.with_line_lengths(horizontal, vertical),
        }
    }

    #[must_use]
    pub fn with_image_data(self, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: self.inner.with_image_data(bytes),
        }
    }

    fn set(builder: BinaryImageBuilder, field_id: u16, value: u8) -> BinaryImageBuilder {
        BinaryImageBuilder {
            inner: builder.inner.text(field_id, value.to_string()),
            layout: builder.layout,
        }
    }

    /// # Errors
    ///
    /// See [`RecordBuilder::build`].
    pub fn build(self) -> Result<Record, BuildError> {
        self.inner.build()
    }
}

impl Default for SignatureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_setters_map_to_fields() {
        let record = TransactionBuilder::new()
            .with_version("0300")
            .with_transaction_type("CRM")
            .with_date("20260801")
            .with_originating_agency("ORI042")
            .with_destination_agency("DAI007")
            .with_control_number("INTE001000A")
            .with_priority(4)
            .build()
            .unwrap();

        assert_eq!(record.text(4).unwrap(), Some("0300".into()));
        assert_eq!(record.text(5).unwrap(), Some("CRM".into()));
        assert_eq!(record.text(6).unwrap(), Some("20260801".into()));
        assert_eq!(record.text(8).unwrap(), Some("ORI042".into()));
        assert_eq!(record.text(7).unwrap(), Some("DAI007".into()));
        assert_eq!(record.text(9).unwrap(), Some("INTE001000A".into()));
        assert_eq!(record.int(10).unwrap(), Some(4));
    }

    #[test]
    fn descriptive_text_fields() {
        let record = DescriptiveTextBuilder::new()
            .with_idc("01")
            .with_field(5, "CRM")
            .build()
            .unwrap();
        assert_eq!(record.text(2).unwrap(), Some("01".into()));
        assert_eq!(record.idc(), 1);
    }

    #[test]
    fn binary_builder_maps_layout_ids() {
        let record = BinaryImageBuilder::new(RecordType::HighResolutionGrayscale)
            .with_idc(1)
            .with_impression(3)
            .with_finger_positions(&[2])
            .with_scanning_resolution(1)
            .with_line_lengths(800, 750)
            .with_compression(1)
            .with_image_data(vec![0xAB; 8])
            .build()
            .unwrap();

        assert_eq!(record.int(grayscale::IMP).unwrap(), Some(3));
        assert_eq!(
            record.image(grayscale::FGP).unwrap(),
            Some(vec![2, 255, 255, 255, 255, 255])
        );
        assert_eq!(record.int(grayscale::HLL).unwrap(), Some(800));
        assert_eq!(record.declared_len(), Some(18 + 8));
    }

    #[test]
    fn signature_builder_roster() {
        let record = SignatureBuilder::new()
            .with_idc(2)
            .with_signature_type(1)
            .with_representation(0)
            .with_scanning_resolution(1)
            .with_line_lengths(620, 128)
            .with_image_data(vec![0x0F; 4])
            .build()
            .unwrap();

        assert_eq!(record.int(signature::SIG).unwrap(), Some(1));
        assert_eq!(record.int(signature::HLL).unwrap(), Some(620));
        assert_eq!(record.declared_len(), Some(12 + 4));
    }

    #[test]
    fn tagged_image_builder_with_manual_fields() {
        let record = TaggedImageBuilder::new(RecordType::LatentImage)
            .with_idc("3")
            .with_source_agency("ORI042")
            .with_line_lengths(640, 480)
            .with_pixel_density(500, 500)
            .with_compression("WSQ20")
            .with_pixel_depth(8)
            .with_image_data(vec![0xFF, 0xA0])
            .build()
            .unwrap();

        assert_eq!(record.text(tagged_image::CGA).unwrap(), Some("WSQ20".into()));
        assert_eq!(record.int(tagged_image::BPX).unwrap(), Some(8));
        assert_eq!(record.image(999).unwrap(), Some(vec![0xFF, 0xA0]));
    }

    #[test]
    fn image_data_outside_catalog_rejected() {
        // Type-9 has no 999 slot; the generic builder refuses it.
        let result = RecordBuilder::new(RecordType::Minutiae)
            .image(999, vec![1, 2, 3])
            .build();
        assert!(matches!(
            result,
            Err(BuildError::FieldOutsideCatalog {
                tag: 9,
                field_id: 999
            })
        ));
    }
}
