use an2k_types::TypeError;
use an2k_wire::WireError;

/// Errors surfaced by the reader, writer and per-framing handlers.
///
/// This is the API-facing ladder: wire-level problems
/// ([`WireError`]) and model-level problems ([`TypeError`]) pass
/// through transparently, framing problems are raised here with the
/// buffer offset where parsing stopped.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The buffer ended mid-record, outside the tolerated
    /// truncated-DATA case.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput { offset: usize },

    /// The record's framing is unusable: a binary LEN shorter than the
    /// fixed prefix, a tag without `:`, a non-numeric LEN.
    #[error("malformed record framing at offset {offset}: {detail}")]
    MalformedFraming { detail: &'static str, offset: usize },

    /// A stored field cannot be serialized — missing where the layout
    /// requires it, or out of range for its wire slot.
    #[error("field {field_id} has no serializable value")]
    UnserializableField { field_id: u16 },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
