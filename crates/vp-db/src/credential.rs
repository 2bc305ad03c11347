//! Credential digests for the student registry.
//!
//! Credentials are stored as lowercase-hex SHA-256 digests. Equality of
//! digests is the whole verification protocol; there is no salt or KDF in
//! the registry's contract, so the same input always produces the same
//! stored value.

use sha2::{Digest, Sha256};

/// Digest a raw credential for storage.
#[must_use]
pub fn hash_credential(credential: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credential.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Check a presented credential against a stored digest.
#[must_use]
pub fn verify_credential(credential: &str, stored_hash: &str) -> bool {
    hash_credential(credential) == stored_hash
}
