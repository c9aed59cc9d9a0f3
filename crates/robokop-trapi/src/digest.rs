//! Stable content digests for TRAPI documents.
//!
//! Used as identity keys: the Biolink derivation cache recomputes only when
//! the digest of its source document changes, and the document store records
//! the digest of every stored payload.
//!
//! - algorithm: **FNV-1a 64-bit**
//! - input: compact JSON serialization of the value
//! - output: `"fnv1a64:<16 lowercase hex digits>"`
//!
//! Not a security primitive.

use serde_json::Value;

/// Prefix used in serialized digests.
pub const DIGEST_PREFIX: &str = "fnv1a64:";

/// FNV-1a 64-bit digest over arbitrary bytes.
pub fn fnv1a64_digest_bytes(bytes: &[u8]) -> String {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x00000100000001b3;

    let mut hash = FNV_OFFSET_BASIS;
    for b in bytes {
        hash ^= (*b) as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }

    format!("{DIGEST_PREFIX}{hash:016x}")
}

/// Digest of a JSON document.
///
/// Key order participates in the digest, so two documents that differ only
/// in property order get different digests.
pub fn json_digest(value: &Value) -> String {
    // Serializing a `Value` cannot fail: all keys are strings.
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    fnv1a64_digest_bytes(&bytes)
}
