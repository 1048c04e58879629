//! Content digest helper.
//!
//! Transactions in circulation are tracked by the SHA-256 of their raw
//! bytes; the reader exposes this for audit trails and dedup.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
