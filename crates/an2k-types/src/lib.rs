#![warn(clippy::pedantic)]

pub mod catalog;
pub mod error;
pub mod field;
pub mod file;
pub mod record;
pub mod record_type;

pub use error::TypeError;
pub use field::Field;
pub use file::An2kFile;
pub use record::Record;
pub use record_type::{BinaryLayout, Framing, RecordType, Revision};
