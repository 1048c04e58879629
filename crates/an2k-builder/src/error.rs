use an2k_codec::CodecError;
use an2k_image::ProbeError;
use an2k_types::TypeError;

/// Errors raised while constructing records and files.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A field id outside the record type's declared catalog.
    #[error("field {field_id} is outside the catalog of record type {tag}")]
    FieldOutsideCatalog { tag: u8, field_id: u16 },

    /// The file builder was finalized without a Type-1 record.
    #[error("file builder needs a Type-1 transaction information record")]
    MissingTransactionRecord,

    /// A record was handed to the wrong builder slot — a Type-1 as a
    /// content record, or a content record as the transaction.
    #[error("record type {tag} cannot occupy this slot")]
    MisplacedRecord { tag: u8 },

    /// A control-number base that is not exactly 10 characters.
    #[error("control number base must be 10 characters, got {length}")]
    ChecksumInputLength { length: usize },

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Type(#[from] TypeError),
}
