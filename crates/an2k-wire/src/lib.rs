#![warn(clippy::pedantic)]

pub mod be;
pub mod charset;
pub mod digest;
pub mod error;
pub mod separators;

pub use charset::Charset;
pub use error::WireError;
