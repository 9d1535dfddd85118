// crates/oraplan-core/src/core/credentials.rs
// ============================================================================
// Module: Oraplan Credentials
// Description: Master credential generation and secret record packaging.
// Purpose: Generate policy-conforming passwords and derive secret-store paths.
// Dependencies: rand, serde
// ============================================================================

//! ## Overview
//! Primary deployments receive one generated master credential per
//! evaluation. Passwords are drawn from the OS random number generator under
//! a composition policy, paired with the fixed master username, and packaged
//! as a secret record addressed by an environment-dependent path keyed by the
//! instance network address. The write itself is a one-shot operation owned
//! by the secret sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::RngCore;
use rand::rngs::OsRng;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed master username for generated credentials.
pub const MASTER_USERNAME: &str = "admin";

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Secret path prefix for production deployments.
const PROD_PATH_PREFIX: &str = "rds/aws-orcl-prod";

/// Secret path prefix for non-production deployments.
const NONPROD_PATH_PREFIX: &str = "rds/aws-orcl-nonprod";

/// Uppercase character class.
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Lowercase character class.
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
/// Digit character class.
const DIGITS: &[u8] = b"0123456789";
/// Special character class; excludes `/`, `@`, `"`, and space, which the
/// engine rejects in master passwords.
const SPECIAL: &[u8] = b"!#$%&()*+,-.:;<=>?[]^_{|}~";

// ============================================================================
// SECTION: Environment
// ============================================================================

/// Deployment environment, selecting the secret path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Production deployments.
    Production,
    /// Everything else.
    NonProduction,
}

impl Environment {
    /// Returns the secret path prefix for this environment.
    #[must_use]
    pub const fn path_prefix(&self) -> &'static str {
        match self {
            Self::Production => PROD_PATH_PREFIX,
            Self::NonProduction => NONPROD_PATH_PREFIX,
        }
    }
}

/// Derives the secret-store path for an instance network address.
#[must_use]
pub fn secret_path(environment: Environment, address: &str) -> String {
    format!("{}/{}", environment.path_prefix(), address)
}

// ============================================================================
// SECTION: Password Policy
// ============================================================================

/// Password composition policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Total password length.
    pub length: usize,
    /// Minimum uppercase characters.
    pub min_upper: usize,
    /// Minimum lowercase characters.
    pub min_lower: usize,
    /// Minimum digit characters.
    pub min_digit: usize,
    /// Minimum special characters.
    pub min_special: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 20,
            min_upper: 2,
            min_lower: 2,
            min_digit: 2,
            min_special: 2,
        }
    }
}

impl PasswordPolicy {
    /// Validates the policy bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError`] when the policy cannot be satisfied.
    pub fn validate(&self) -> Result<(), PasswordError> {
        if self.length < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort(self.length));
        }
        if self.length > MAX_PASSWORD_LENGTH {
            return Err(PasswordError::TooLong(self.length));
        }
        let required = self.min_upper + self.min_lower + self.min_digit + self.min_special;
        if required > self.length {
            return Err(PasswordError::MinimumsExceedLength {
                required,
                length: self.length,
            });
        }
        Ok(())
    }
}

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    /// Configured length is below the minimum.
    #[error("password length {0} is below the minimum of {MIN_PASSWORD_LENGTH}")]
    TooShort(usize),
    /// Configured length exceeds the maximum.
    #[error("password length {0} exceeds the maximum of {MAX_PASSWORD_LENGTH}")]
    TooLong(usize),
    /// Character-class minimums cannot fit in the configured length.
    #[error("character class minimums ({required}) exceed password length ({length})")]
    MinimumsExceedLength {
        /// Sum of configured minimums.
        required: usize,
        /// Configured password length.
        length: usize,
    },
}

// ============================================================================
// SECTION: Password Generation
// ============================================================================

/// Generates a password conforming to the policy using the OS RNG.
///
/// # Errors
///
/// Returns [`PasswordError`] when the policy is invalid.
pub fn generate_password(policy: &PasswordPolicy) -> Result<String, PasswordError> {
    generate_password_from_rng(policy, &mut OsRng)
}

/// Generates a password from a caller-supplied RNG.
///
/// Deterministic RNGs are for tests only; production callers go through
/// [`generate_password`].
///
/// # Errors
///
/// Returns [`PasswordError`] when the policy is invalid.
pub fn generate_password_from_rng<R: RngCore>(
    policy: &PasswordPolicy,
    rng: &mut R,
) -> Result<String, PasswordError> {
    policy.validate()?;

    let mut chars: Vec<u8> = Vec::with_capacity(policy.length);
    push_class(rng, &mut chars, UPPER, policy.min_upper);
    push_class(rng, &mut chars, LOWER, policy.min_lower);
    push_class(rng, &mut chars, DIGITS, policy.min_digit);
    push_class(rng, &mut chars, SPECIAL, policy.min_special);

    let full: Vec<u8> = [UPPER, LOWER, DIGITS, SPECIAL].concat();
    while chars.len() < policy.length {
        chars.push(sample(rng, &full));
    }
    shuffle(rng, &mut chars);

    Ok(chars.into_iter().map(char::from).collect())
}

/// Appends `count` samples from one character class.
fn push_class<R: RngCore>(rng: &mut R, out: &mut Vec<u8>, class: &[u8], count: usize) {
    for _ in 0..count {
        out.push(sample(rng, class));
    }
}

/// Samples one byte from an alphabet without modulo bias.
fn sample<R: RngCore>(rng: &mut R, alphabet: &[u8]) -> u8 {
    let len = alphabet.len() as u64;
    let bound = u64::MAX - (u64::MAX % len);
    loop {
        let value = rng.next_u64();
        if value < bound {
            let index = usize::try_from(value % len).unwrap_or(0);
            return alphabet[index];
        }
    }
}

/// Fisher-Yates shuffle over the generated characters.
fn shuffle<R: RngCore>(rng: &mut R, chars: &mut [u8]) {
    for i in (1..chars.len()).rev() {
        let bound = (i as u64) + 1;
        let cap = u64::MAX - (u64::MAX % bound);
        let j = loop {
            let value = rng.next_u64();
            if value < cap {
                break usize::try_from(value % bound).unwrap_or(0);
            }
        };
        chars.swap(i, j);
    }
}

// ============================================================================
// SECTION: Secret Record
// ============================================================================

/// Secret-store record packaged for the one-shot write.
///
/// # Invariants
/// - `path` is derived from the environment prefix and instance address.
/// - The record is immutable once derived; re-resolution produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    /// Secret-store path.
    pub path: String,
    /// Master username.
    pub username: String,
    /// Generated master password.
    pub password: String,
    /// Instance network address the secret is keyed by.
    pub host: String,
    /// Listener port.
    pub port: u16,
    /// Deletes all prior versions before writing.
    pub delete_prior_versions: bool,
}
