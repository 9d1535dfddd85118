// crates/oraplan-core/src/interfaces/mod.rs
// ============================================================================
// Module: Oraplan Interfaces
// Description: Backend-agnostic interfaces for subnet discovery and secret storage.
// Purpose: Define the contract surfaces used around topology resolution.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Oraplan integrates with cloud discovery and secret
//! storage without embedding provider SDKs. Implementations must be
//! deterministic for identical inputs and fail closed on missing or invalid
//! data; resolution itself never performs I/O.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::credentials::SecretRecord;
use crate::core::identifiers::VpcId;
use crate::core::network::SubnetCandidate;

// ============================================================================
// SECTION: Subnet Source
// ============================================================================

/// Subnet discovery errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SubnetSourceError {
    /// Discovery backend reported an error.
    #[error("subnet source error: {0}")]
    Source(String),
    /// The requested VPC is unknown to the backend.
    #[error("unknown vpc: {0}")]
    UnknownVpc(String),
}

/// Backend-agnostic subnet discovery.
///
/// Implementations return only candidates in the requested VPC that carry
/// the private network tag; IP-availability filtering happens in the core.
pub trait SubnetSource {
    /// Discovers candidate subnets for a VPC.
    ///
    /// # Errors
    ///
    /// Returns [`SubnetSourceError`] when discovery fails.
    fn discover(&self, vpc_id: &VpcId) -> Result<Vec<SubnetCandidate>, SubnetSourceError>;
}

// ============================================================================
// SECTION: Secret Sink
// ============================================================================

/// Secret storage errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SecretSinkError {
    /// Secret sink reported an error.
    #[error("secret sink error: {0}")]
    Sink(String),
}

/// Secret store accepting the one-shot credential write.
pub trait SecretSink {
    /// Stores a secret record at its derived path.
    ///
    /// Implementations honor `delete_prior_versions` before writing; no
    /// retry or versioning semantics exist beyond that.
    ///
    /// # Errors
    ///
    /// Returns [`SecretSinkError`] when the write fails.
    fn store(&self, record: &SecretRecord) -> Result<(), SecretSinkError>;
}
