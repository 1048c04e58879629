/// Errors raised by the typed record model.
///
/// These sit above the wire layer: they concern the semantic shape of
/// records and files rather than byte framing. Framing problems surface
/// as `an2k_codec` errors instead.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// A text accessor was used on an image field or vice versa.
    #[error("field {field_id} is a {found} field, not {expected}")]
    FieldTypeMismatch {
        field_id: u16,
        expected: &'static str,
        found: &'static str,
    },

    /// A record-type tag outside the 1..=17 taxonomy.
    #[error("unknown record type: {tag}")]
    UnknownRecordType { tag: u8 },

    /// A file was assembled without a Type-1 transaction record.
    #[error("file has no Type-1 transaction information record")]
    MissingTransactionRecord,

    /// A file was assembled with more than one Type-1 record.
    #[error("file has {count} Type-1 records, expected exactly one")]
    DuplicateTransactionRecord { count: usize },
}
