// crates/oraplan-core/src/core/identifiers.rs
// ============================================================================
// Module: Oraplan Identifiers
// Description: Canonical identifiers for deployment requests and cloud objects.
// Purpose: Provide strongly typed, serializable identifiers with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the string-based identifiers used throughout Oraplan.
//! The database identifier is validated at construction because it feeds
//! resource naming downstream; cloud object identifiers (VPC, subnet, source
//! ARN) are opaque and validated by the provisioning engine, not here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of a database instance identifier.
pub const MAX_DB_IDENTIFIER_LENGTH: usize = 63;

// ============================================================================
// SECTION: Database Identifier
// ============================================================================

/// Validated database instance identifier.
///
/// # Invariants
/// - 1..=63 ASCII characters, lowercase alphanumeric or hyphen.
/// - Starts with a letter, never ends with a hyphen, no consecutive hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DbIdentifier(String);

impl DbIdentifier {
    /// Parses and validates a database identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] when the identifier violates the naming
    /// convention.
    pub fn parse(id: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if id.len() > MAX_DB_IDENTIFIER_LENGTH {
            return Err(IdentifierError::TooLong(id.len()));
        }
        let first = id.as_bytes()[0];
        if !first.is_ascii_lowercase() {
            return Err(IdentifierError::InvalidStart(char::from(first)));
        }
        if id.ends_with('-') {
            return Err(IdentifierError::TrailingHyphen);
        }
        if id.contains("--") {
            return Err(IdentifierError::ConsecutiveHyphens);
        }
        for ch in id.chars() {
            if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-') {
                return Err(IdentifierError::InvalidCharacter(ch));
            }
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DbIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Database identifier validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    /// Identifier is empty.
    #[error("identifier must be non-empty")]
    Empty,
    /// Identifier exceeds the maximum length.
    #[error("identifier exceeds {MAX_DB_IDENTIFIER_LENGTH} characters: {0}")]
    TooLong(usize),
    /// Identifier does not start with a lowercase letter.
    #[error("identifier must start with a lowercase letter, found {0:?}")]
    InvalidStart(char),
    /// Identifier contains a disallowed character.
    #[error("identifier contains disallowed character {0:?}")]
    InvalidCharacter(char),
    /// Identifier ends with a hyphen.
    #[error("identifier must not end with a hyphen")]
    TrailingHyphen,
    /// Identifier contains consecutive hyphens.
    #[error("identifier must not contain consecutive hyphens")]
    ConsecutiveHyphens,
}

// ============================================================================
// SECTION: Cloud Object Identifiers
// ============================================================================

/// VPC identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VpcId(String);

impl VpcId {
    /// Creates a new VPC identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for VpcId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VpcId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Subnet identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubnetId(String);

impl SubnetId {
    /// Creates a new subnet identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubnetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SubnetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SubnetId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Source database ARN for cross-region replication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceDbArn(String);

impl SourceDbArn {
    /// Creates a new source database ARN.
    #[must_use]
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    /// Returns the ARN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceDbArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SourceDbArn {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SourceDbArn {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: KMS Key Identifier
// ============================================================================

/// Encryption key identifier with a shallow shape check.
///
/// # Invariants
/// - Non-empty and free of whitespace; anything deeper (existence, access)
///   is an external-dependency concern surfaced by the provisioning engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KmsKeyId(String);

impl KmsKeyId {
    /// Parses an encryption key identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::Empty`] for empty input and
    /// [`IdentifierError::InvalidCharacter`] when the value contains
    /// whitespace.
    pub fn parse(id: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdentifierError::Empty);
        }
        if let Some(ch) = id.chars().find(|ch| ch.is_whitespace()) {
            return Err(IdentifierError::InvalidCharacter(ch));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KmsKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
