//! Per-type field-id catalogs and the semantic ids used across crates.
//!
//! Every record type declares which field ids it may carry; builders
//! reject anything outside the set. Binary rosters are closed (exactly
//! the prefix fields plus DATA), tagged catalogs are ranges with the 999
//! image slot added for the image-bearing types.

use crate::record_type::{BinaryLayout, Framing, RecordType};

/// Field id 1 — record byte length, present in every record.
pub const LEN: u16 = 1;

/// Field id 2 — information designation character.
pub const IDC: u16 = 2;

/// Field id 999 — image data in text-tagged image records.
pub const DATA: u16 = 999;

/// Semantic slots of the Type-1 transaction information record.
pub mod transaction {
    /// Version / domain-of-use indicator; selects the text charset.
    pub const VERSION: u16 = 4;
    pub const FILE_CONTENT: u16 = 3;
    pub const TYPE_OF_TRANSACTION: u16 = 5;
    pub const DATE: u16 = 6;
    pub const DESTINATION_AGENCY: u16 = 7;
    pub const ORIGINATING_AGENCY: u16 = 8;
    pub const CONTROL_NUMBER: u16 = 9;
    pub const PRIORITY: u16 = 10;
    pub const NATIVE_RESOLUTION: u16 = 11;
    pub const NOMINAL_RESOLUTION: u16 = 12;
    pub const DOMAIN_NAME: u16 = 13;
}

/// Semantic slots shared by the text-tagged image types (10, 13–17).
pub mod tagged_image {
    pub const IMAGE_TYPE: u16 = 3;
    pub const SOURCE_AGENCY: u16 = 4;
    pub const CAPTURE_DATE: u16 = 5;
    pub const HLL: u16 = 6;
    pub const VLL: u16 = 7;
    pub const SCALE_UNITS: u16 = 8;
    pub const HPS: u16 = 9;
    pub const VPS: u16 = 10;
    pub const CGA: u16 = 11;
    /// Colorspace for Type-10; pixel depth for 13–17.
    pub const CSP: u16 = 12;
    pub const BPX: u16 = 12;
    pub const FGP: u16 = 13;
}

/// Roster positions of the Grayscale binary layout (types 3, 4, 6, 7).
pub mod grayscale {
    pub const IMP: u16 = 3;
    pub const FGP: u16 = 4;
    pub const ISR: u16 = 5;
    pub const HLL: u16 = 6;
    pub const VLL: u16 = 7;
    pub const GCA: u16 = 8;
    pub const DATA: u16 = 9;
}

/// Roster positions of the Reduced binary layout (type 5).
pub mod reduced {
    pub const IMP: u16 = 3;
    pub const ISR: u16 = 4;
    pub const HLL: u16 = 5;
    pub const VLL: u16 = 6;
    pub const DATA: u16 = 7;
}

/// Roster positions of the Signature layout (type 8).
pub mod signature {
    pub const SIG: u16 = 3;
    pub const SRT: u16 = 4;
    pub const ISR: u16 = 5;
    pub const HLL: u16 = 6;
    pub const VLL: u16 = 7;
    pub const DATA: u16 = 8;
}

/// True if `field_id` belongs to `record_type`'s declared catalog.
pub fn allows(record_type: RecordType, field_id: u16) -> bool {
    if field_id == 0 {
        return false;
    }
    match record_type.framing() {
        Framing::Binary(layout) => field_id <= layout.field_count(),
        Framing::Tagged { image_field } => {
            if image_field == Some(field_id) {
                return true;
            }
            let cap = match record_type {
                RecordType::TransactionInformation => 16,
                RecordType::DescriptiveText | RecordType::VoiceData | RecordType::DentalRecord => {
                    255
                }
                RecordType::Minutiae => 30,
                // Image-bearing tagged types: attribute fields 1..=99
                // plus the 999 slot handled above.
                _ => 99,
            };
            field_id <= cap
        }
    }
}

/// The DATA-equivalent field id for `record_type`, if it carries image
/// bytes at all.
pub fn image_data_field(record_type: RecordType) -> Option<u16> {
    match record_type.framing() {
        Framing::Tagged { image_field } => image_field,
        Framing::Binary(BinaryLayout::Grayscale) => Some(grayscale::DATA),
        Framing::Binary(BinaryLayout::Reduced) => Some(reduced::DATA),
        Framing::Binary(BinaryLayout::Signature) => Some(signature::DATA),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_catalog_bounds() {
        let t1 = RecordType::TransactionInformation;
        assert!(allows(t1, LEN));
        assert!(allows(t1, transaction::VERSION));
        assert!(allows(t1, 16));
        assert!(!allows(t1, 17));
        assert!(!allows(t1, DATA));
        assert!(!allows(t1, 0));
    }

    #[test]
    fn tagged_image_catalog_includes_999() {
        let t10 = RecordType::FacialSmtImage;
        assert!(allows(t10, tagged_image::CGA));
        assert!(allows(t10, 99));
        assert!(allows(t10, DATA));
        assert!(!allows(t10, 100));
        assert!(!allows(t10, 998));
    }

    #[test]
    fn minutiae_has_no_image_slot() {
        let t9 = RecordType::Minutiae;
        assert!(allows(t9, 30));
        assert!(!allows(t9, 31));
        assert!(!allows(t9, DATA));
        assert_eq!(image_data_field(t9), None);
    }

    #[test]
    fn binary_rosters_are_closed() {
        let t4 = RecordType::HighResolutionGrayscale;
        assert!(allows(t4, grayscale::DATA));
        assert!(!allows(t4, 10));

        let t5 = RecordType::LowResolutionBinary;
        assert!(allows(t5, reduced::DATA));
        assert!(!allows(t5, 8));

        let t8 = RecordType::Signature;
        assert!(allows(t8, signature::DATA));
        assert!(!allows(t8, 9));
    }

    #[test]
    fn data_slots() {
        assert_eq!(image_data_field(RecordType::FacialSmtImage), Some(999));
        assert_eq!(
            image_data_field(RecordType::HighResolutionGrayscale),
            Some(grayscale::DATA)
        );
        assert_eq!(
            image_data_field(RecordType::Signature),
            Some(signature::DATA)
        );
        assert_eq!(image_data_field(RecordType::DescriptiveText), None);
    }
}
