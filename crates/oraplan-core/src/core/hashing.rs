// crates/oraplan-core/src/core/hashing.rs
// ============================================================================
// Module: Oraplan Plan Fingerprinting
// Description: RFC 8785 JSON canonicalization and plan digest computation.
// Purpose: Provide deterministic fingerprints for resolved plans.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Resolved plans carry a fingerprint computed over their RFC 8785 (JCS)
//! canonical JSON form. Two resolutions of the same request against the same
//! inputs produce the same fingerprint, which makes plan drift detectable
//! without diffing the full document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Fingerprint
// ============================================================================

/// Algorithm identifier carried in fingerprints.
pub const FINGERPRINT_ALGORITHM: &str = "sha256";

/// Deterministic plan fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFingerprint {
    /// Hash algorithm identifier.
    pub algorithm: String,
    /// Lowercase hex-encoded digest.
    pub value: String,
}

/// Errors raised when computing fingerprints.
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

/// Fingerprints a serializable value over its canonical JSON form.
///
/// # Errors
///
/// Returns [`FingerprintError::Canonicalization`] when serialization fails.
pub fn fingerprint_canonical_json<T: Serialize + ?Sized>(
    value: &T,
) -> Result<PlanFingerprint, FingerprintError> {
    let bytes =
        serde_jcs::to_vec(value).map_err(|err| FingerprintError::Canonicalization(err.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hasher.finalize();
    Ok(PlanFingerprint {
        algorithm: FINGERPRINT_ALGORITHM.to_string(),
        value: hex_encode(&digest),
    })
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
