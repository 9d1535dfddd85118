// crates/oraplan-core/tests/credentials.rs
// ============================================================================
// Module: Credential Tests
// Description: Tests for password generation and secret path derivation.
// Purpose: Pin policy enforcement, the safe alphabet, and path prefixes.
// Dependencies: oraplan-core, rand
// ============================================================================
//! ## Overview
//! Exercises password policy validation, class minimums in generated
//! passwords, the excluded characters, and environment path prefixes.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use oraplan_core::Environment;
use oraplan_core::PasswordError;
use oraplan_core::PasswordPolicy;
use oraplan_core::credentials::generate_password_from_rng;
use oraplan_core::generate_password;
use oraplan_core::secret_path;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// SECTION: Policy Validation
// ============================================================================

/// The default policy validates.
#[test]
fn default_policy_validates() {
    PasswordPolicy::default().validate().unwrap();
}

/// Length bounds are enforced.
#[test]
fn enforces_length_bounds() {
    let short = PasswordPolicy {
        length: 4,
        ..PasswordPolicy::default()
    };
    assert!(matches!(short.validate().unwrap_err(), PasswordError::TooShort(4)));

    let long = PasswordPolicy {
        length: 200,
        ..PasswordPolicy::default()
    };
    assert!(matches!(long.validate().unwrap_err(), PasswordError::TooLong(200)));
}

/// Class minimums must fit the length.
#[test]
fn enforces_minimum_sum() {
    let policy = PasswordPolicy {
        length: 10,
        min_upper: 4,
        min_lower: 4,
        min_digit: 4,
        min_special: 0,
    };
    assert!(matches!(
        policy.validate().unwrap_err(),
        PasswordError::MinimumsExceedLength {
            required: 12,
            length: 10
        }
    ));
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Generated passwords honor length and class minimums.
#[test]
fn generated_passwords_honor_policy() {
    let policy = PasswordPolicy {
        length: 24,
        min_upper: 3,
        min_lower: 3,
        min_digit: 3,
        min_special: 3,
    };
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let password = generate_password_from_rng(&policy, &mut rng).unwrap();
        assert_eq!(password.len(), 24);
        assert!(password.chars().filter(char::is_ascii_uppercase).count() >= 3);
        assert!(password.chars().filter(char::is_ascii_lowercase).count() >= 3);
        assert!(password.chars().filter(char::is_ascii_digit).count() >= 3);
        let special =
            password.chars().filter(|ch| !ch.is_ascii_alphanumeric()).count();
        assert!(special >= 3);
    }
}

/// Generated passwords never contain engine-rejected characters.
#[test]
fn generated_passwords_use_safe_alphabet() {
    let policy = PasswordPolicy::default();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let password = generate_password_from_rng(&policy, &mut rng).unwrap();
        for forbidden in ['/', '@', '"', ' '] {
            assert!(!password.contains(forbidden), "found {forbidden:?} in {password:?}");
        }
        assert!(password.is_ascii());
    }
}

/// The OS RNG entry point also enforces the policy.
#[test]
fn os_rng_entry_point_enforces_policy() {
    let invalid = PasswordPolicy {
        length: 2,
        ..PasswordPolicy::default()
    };
    assert!(generate_password(&invalid).is_err());
    assert_eq!(generate_password(&PasswordPolicy::default()).unwrap().len(), 20);
}

// ============================================================================
// SECTION: Secret Paths
// ============================================================================

/// Environment selects the documented path prefix.
#[test]
fn environment_selects_path_prefix() {
    assert_eq!(
        secret_path(Environment::Production, "ordb-01"),
        "rds/aws-orcl-prod/ordb-01"
    );
    assert_eq!(
        secret_path(Environment::NonProduction, "ordb-01"),
        "rds/aws-orcl-nonprod/ordb-01"
    );
}
