//! Run fingerprinting.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 of `content`, hex encoded.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// SHA-256 of the JSON encoding of `value`.
///
/// Field order follows the struct definitions, so identical values always
/// produce identical fingerprints.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(calculate_checksum(&json))
}
