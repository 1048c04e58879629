#![warn(clippy::pedantic)]

pub mod error;
pub mod file;
pub mod record;
pub mod tcn;
pub mod typed;

pub use error::BuildError;
pub use file::FileBuilder;
pub use record::RecordBuilder;
pub use tcn::generate_agency_tcn;
pub use typed::{
    BinaryImageBuilder, DescriptiveTextBuilder, MinutiaeBuilder, SignatureBuilder,
    TaggedImageBuilder, TransactionBuilder,
};
