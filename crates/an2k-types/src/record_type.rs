use crate::error::TypeError;

/// Revisions of the standard that matter for taxonomy gating.
///
/// Values order chronologically, so `<=` comparisons express "was
/// already published at".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Revision {
    V0200,
    V0300,
    V0400,
    V0500,
}

impl Revision {
    /// The version string as it appears in the Type-1 header.
    pub fn label(self) -> &'static str {
        match self {
            Self::V0200 => "0200",
            Self::V0300 => "0300",
            Self::V0400 => "0400",
            Self::V0500 => "0500",
        }
    }
}

/// The logical record taxonomy, types 1 through 17.
///
/// ```text
/// ┌─────┬────────────────────────────┬─────────┬────────────┐
/// │ Tag │ Variant                    │ Framing │ Status     │
/// ├─────┼────────────────────────────┼─────────┼────────────┤
/// │  1  │ TransactionInformation     │ tagged  │            │
/// │  2  │ DescriptiveText            │ tagged  │            │
/// │  3  │ LowResolutionGrayscale     │ binary  │ deprecated │
/// │  4  │ HighResolutionGrayscale    │ binary  │            │
/// │  5  │ LowResolutionBinary        │ binary  │ deprecated │
/// │  6  │ HighResolutionBinary       │ binary  │ deprecated │
/// │  7  │ UserDefinedImage           │ binary  │            │
/// │  8  │ Signature                  │ binary  │            │
/// │  9  │ Minutiae                   │ tagged  │            │
/// │ 10  │ FacialSmtImage             │ tagged  │            │
/// │ 11  │ VoiceData                  │ tagged  │ reserved   │
/// │ 12  │ DentalRecord               │ tagged  │ reserved   │
/// │ 13  │ LatentImage                │ tagged  │            │
/// │ 14  │ VariableResolutionFinger   │ tagged  │            │
/// │ 15  │ VariableResolutionPalm     │ tagged  │            │
/// │ 16  │ UserDefinedTestImage       │ tagged  │            │
/// │ 17  │ IrisImage                  │ tagged  │            │
/// └─────┴────────────────────────────┴─────────┴────────────┘
/// ```
///
/// Deprecated types (3, 5, 6) are still read and written — files carrying
/// them remain in circulation. Tags 18–22, 98 and 99 are reserved by the
/// standards family and deliberately absent here; a content directory
/// naming them fails with [`TypeError::UnknownRecordType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordType {
    TransactionInformation,
    DescriptiveText,
    LowResolutionGrayscale,
    HighResolutionGrayscale,
    LowResolutionBinary,
    HighResolutionBinary,
    UserDefinedImage,
    Signature,
    Minutiae,
    FacialSmtImage,
    VoiceData,
    DentalRecord,
    LatentImage,
    VariableResolutionFinger,
    VariableResolutionPalm,
    UserDefinedTestImage,
    IrisImage,
}

/// Wire framing family of a record type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
    /// ASCII `"{type}.{field:03}:{value}"` fields, FS-terminated.
    /// `image_field` names the one field id (999) whose value is raw
    /// bytes consumed by declared length rather than separator scan.
    Tagged { image_field: Option<u16> },
    /// Fixed-offset big-endian prefix followed by opaque DATA.
    Binary(BinaryLayout),
}

/// Fixed-prefix layout of the binary-framed types.
///
/// ```text
/// ┌───────────┬───────┬──────────────────────────────────────────────┐
/// │ Layout    │ Fixed │ Prefix fields                                │
/// ├───────────┼───────┼──────────────────────────────────────────────┤
/// │ Grayscale │  18   │ LEN(4) IDC(1) IMP(1) FGP(6) ISR(1)           │
/// │           │       │ HLL(2) VLL(2) GCA(1)                         │
/// │ Reduced   │  11   │ LEN(4) IDC(1) IMP(1) ISR(1) HLL(2) VLL(2)    │
/// │ Signature │  12   │ LEN(4) IDC(1) SIG(1) SRT(1) ISR(1)           │
/// │           │       │ HLL(2) VLL(2)                                │
/// └───────────┴───────┴──────────────────────────────────────────────┘
/// ```
///
/// DATA occupies `LEN − fixed` bytes, clamped to the remaining buffer
/// when the declared length overruns a truncated capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryLayout {
    /// Types 3, 4, 6, 7.
    Grayscale,
    /// Type 5.
    Reduced,
    /// Type 8.
    Signature,
}

impl BinaryLayout {
    /// `FIXED_SIZE_OF_FIELDS` — prefix byte count before DATA.
    pub fn fixed_size(self) -> usize {
        match self {
            Self::Grayscale => 18,
            Self::Reduced => 11,
            Self::Signature => 12,
        }
    }

    /// Number of fields in the roster, DATA included.
    pub fn field_count(self) -> u16 {
        match self {
            Self::Grayscale => 9,
            Self::Reduced => 7,
            Self::Signature => 8,
        }
    }
}

/// Tagged-record image data field id (`x.999`).
pub const IMAGE_DATA_FIELD: u16 = 999;

impl RecordType {
    /// All seventeen types in tag order.
    pub const ALL: [Self; 17] = [
        Self::TransactionInformation,
        Self::DescriptiveText,
        Self::LowResolutionGrayscale,
        Self::HighResolutionGrayscale,
        Self::LowResolutionBinary,
        Self::HighResolutionBinary,
        Self::UserDefinedImage,
        Self::Signature,
        Self::Minutiae,
        Self::FacialSmtImage,
        Self::VoiceData,
        Self::DentalRecord,
        Self::LatentImage,
        Self::VariableResolutionFinger,
        Self::VariableResolutionPalm,
        Self::UserDefinedTestImage,
        Self::IrisImage,
    ];

    /// The numeric type tag as it appears on the wire and in CNT rows.
    pub fn tag(self) -> u8 {
        match self {
            Self::TransactionInformation => 1,
            Self::DescriptiveText => 2,
            Self::LowResolutionGrayscale => 3,
            Self::HighResolutionGrayscale => 4,
            Self::LowResolutionBinary => 5,
            Self::HighResolutionBinary => 6,
            Self::UserDefinedImage => 7,
            Self::Signature => 8,
            Self::Minutiae => 9,
            Self::FacialSmtImage => 10,
            Self::VoiceData => 11,
            Self::DentalRecord => 12,
            Self::LatentImage => 13,
            Self::VariableResolutionFinger => 14,
            Self::VariableResolutionPalm => 15,
            Self::UserDefinedTestImage => 16,
            Self::IrisImage => 17,
        }
    }

    /// Look a type up by tag.
    ///
    /// # Errors
    ///
    /// [`TypeError::UnknownRecordType`] for tags outside 1..=17 —
    /// including the reserved 18–22, 98 and 99.
    pub fn from_tag(tag: u8) -> Result<Self, TypeError> {
        match tag {
            1 => Ok(Self::TransactionInformation),
            2 => Ok(Self::DescriptiveText),
            3 => Ok(Self::LowResolutionGrayscale),
            4 => Ok(Self::HighResolutionGrayscale),
            5 => Ok(Self::LowResolutionBinary),
            6 => Ok(Self::HighResolutionBinary),
            7 => Ok(Self::UserDefinedImage),
            8 => Ok(Self::Signature),
            9 => Ok(Self::Minutiae),
            10 => Ok(Self::FacialSmtImage),
            11 => Ok(Self::VoiceData),
            12 => Ok(Self::DentalRecord),
            13 => Ok(Self::LatentImage),
            14 => Ok(Self::VariableResolutionFinger),
            15 => Ok(Self::VariableResolutionPalm),
            16 => Ok(Self::UserDefinedTestImage),
            17 => Ok(Self::IrisImage),
            other => Err(TypeError::UnknownRecordType { tag: other }),
        }
    }

    /// Human label, as shown by the CLI inspector.
    pub fn label(self) -> &'static str {
        match self {
            Self::TransactionInformation => "Transaction information",
            Self::DescriptiveText => "User-defined descriptive text",
            Self::LowResolutionGrayscale => "Low-resolution grayscale fingerprint image",
            Self::HighResolutionGrayscale => "High-resolution grayscale fingerprint image",
            Self::LowResolutionBinary => "Low-resolution binary fingerprint image",
            Self::HighResolutionBinary => "High-resolution binary fingerprint image",
            Self::UserDefinedImage => "User-defined image",
            Self::Signature => "Signature image",
            Self::Minutiae => "Minutiae data",
            Self::FacialSmtImage => "Facial and SMT image",
            Self::VoiceData => "Voice data",
            Self::DentalRecord => "Dental and oral record",
            Self::LatentImage => "Variable-resolution latent image",
            Self::VariableResolutionFinger => "Variable-resolution fingerprint image",
            Self::VariableResolutionPalm => "Variable-resolution palm print image",
            Self::UserDefinedTestImage => "User-defined variable-resolution test image",
            Self::IrisImage => "Iris image",
        }
    }

    /// Revision that introduced the type.
    pub fn introduced(self) -> Revision {
        match self.tag() {
            1..=10 => Revision::V0200,
            11..=16 => Revision::V0300,
            _ => Revision::V0400,
        }
    }

    /// Revision that deprecated the type, if any.
    ///
    /// The reader still accepts deprecated types on input.
    pub fn deprecated(self) -> Option<Revision> {
        match self {
            Self::LowResolutionGrayscale
            | Self::LowResolutionBinary
            | Self::HighResolutionBinary => Some(Revision::V0500),
            _ => None,
        }
    }

    /// Membership query: is this type current under `revision`?
    ///
    /// True when the type was introduced at or before `revision` and not
    /// yet deprecated at it.
    pub fn allowed_under(self, revision: Revision) -> bool {
        self.introduced() <= revision && self.deprecated().is_none_or(|d| revision < d)
    }

    /// The wire framing family for this type.
    pub fn framing(self) -> Framing {
        match self {
            Self::TransactionInformation
            | Self::DescriptiveText
            | Self::Minutiae
            | Self::VoiceData
            | Self::DentalRecord => Framing::Tagged { image_field: None },
            Self::FacialSmtImage
            | Self::LatentImage
            | Self::VariableResolutionFinger
            | Self::VariableResolutionPalm
            | Self::UserDefinedTestImage
            | Self::IrisImage => Framing::Tagged {
                image_field: Some(IMAGE_DATA_FIELD),
            },
            Self::LowResolutionGrayscale
            | Self::HighResolutionGrayscale
            | Self::HighResolutionBinary
            | Self::UserDefinedImage => Framing::Binary(BinaryLayout::Grayscale),
            Self::LowResolutionBinary => Framing::Binary(BinaryLayout::Reduced),
            Self::Signature => Framing::Binary(BinaryLayout::Signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_roundtrip() {
        for record_type in RecordType::ALL {
            let tag = record_type.tag();
            assert_eq!(
                RecordType::from_tag(tag).unwrap(),
                record_type,
                "from_tag mismatch for tag {tag}"
            );
        }
    }

    #[test]
    fn reserved_tags_rejected() {
        for tag in [0u8, 18, 19, 20, 21, 22, 98, 99, 255] {
            assert!(matches!(
                RecordType::from_tag(tag),
                Err(TypeError::UnknownRecordType { tag: t }) if t == tag
            ));
        }
    }

    #[test]
    fn deprecated_types() {
        assert_eq!(
            RecordType::LowResolutionGrayscale.deprecated(),
            Some(Revision::V0500)
        );
        assert_eq!(
            RecordType::LowResolutionBinary.deprecated(),
            Some(Revision::V0500)
        );
        assert_eq!(
            RecordType::HighResolutionBinary.deprecated(),
            Some(Revision::V0500)
        );
        assert_eq!(RecordType::HighResolutionGrayscale.deprecated(), None);
    }

    #[test]
    fn revision_gating() {
        // Type 3 existed through 0400 and is out at 0500.
        let t3 = RecordType::LowResolutionGrayscale;
        assert!(t3.allowed_under(Revision::V0200));
        assert!(t3.allowed_under(Revision::V0400));
        assert!(!t3.allowed_under(Revision::V0500));

        // Iris arrived at 0400.
        let t17 = RecordType::IrisImage;
        assert!(!t17.allowed_under(Revision::V0300));
        assert!(t17.allowed_under(Revision::V0400));
        assert!(t17.allowed_under(Revision::V0500));
    }

    #[test]
    fn framing_assignment() {
        assert_eq!(
            RecordType::TransactionInformation.framing(),
            Framing::Tagged { image_field: None }
        );
        assert_eq!(
            RecordType::FacialSmtImage.framing(),
            Framing::Tagged {
                image_field: Some(999)
            }
        );
        assert_eq!(
            RecordType::HighResolutionGrayscale.framing(),
            Framing::Binary(BinaryLayout::Grayscale)
        );
        assert_eq!(
            RecordType::LowResolutionBinary.framing(),
            Framing::Binary(BinaryLayout::Reduced)
        );
        assert_eq!(
            RecordType::Signature.framing(),
            Framing::Binary(BinaryLayout::Signature)
        );
    }

    #[test]
    fn fixed_sizes() {
        assert_eq!(BinaryLayout::Grayscale.fixed_size(), 18);
        assert_eq!(BinaryLayout::Reduced.fixed_size(), 11);
        assert_eq!(BinaryLayout::Signature.fixed_size(), 12);
    }
}
