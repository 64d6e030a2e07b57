//! Matrix normalization and content fingerprinting.
//!
//! The fingerprint is a SHA-256 digest over the normalized rows with an
//! explicit row separator, rendered as lowercase hex. Row boundaries are
//! part of the digest, so matrices that merely concatenate to the same
//! string do not collide.

use sha2::{Digest, Sha256};

/// Uppercase every row so logically identical matrices hash and classify
/// equal regardless of input case.
pub fn normalize(dna: &[String]) -> Vec<String> {
    dna.iter().map(|row| row.to_uppercase()).collect()
}

/// SHA-256 content digest of the rows, as lowercase hex.
pub fn fingerprint(rows: &[String]) -> String {
    let mut hasher = Sha256::new();
    for row in rows {
        hasher.update(row.as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
