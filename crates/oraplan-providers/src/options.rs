// crates/oraplan-providers/src/options.rs
// ============================================================================
// Module: Option Document Loader
// Description: Loads and validates the external option/parameter document.
// Purpose: Produce a validated option document once, at load time.
// Dependencies: oraplan-core, serde_json
// ============================================================================

//! ## Overview
//! The option document is loaded from a JSON file, parsed against the fixed
//! schema, and validated once. Downstream resolution consumes the returned
//! document without re-parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use oraplan_core::OptionDoc;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum option document size in bytes.
pub const MAX_OPTION_DOC_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Option document loading errors.
#[derive(Debug, Error)]
pub enum OptionDocError {
    /// I/O failure while reading the document.
    #[error("option document io error: {0}")]
    Io(String),
    /// Document exceeds the size limit.
    #[error("option document exceeds {MAX_OPTION_DOC_BYTES} bytes")]
    TooLarge,
    /// JSON parsing error.
    #[error("option document parse error: {0}")]
    Parse(String),
    /// Document content failed validation.
    #[error("invalid option document: {0}")]
    Invalid(#[from] oraplan_core::OptionDocError),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads and validates the option document at `path`.
///
/// # Errors
///
/// Returns [`OptionDocError`] when the file cannot be read, parsed against
/// the fixed schema, or validated.
pub fn load_option_doc(path: &Path) -> Result<OptionDoc, OptionDocError> {
    let file =
        File::open(path).map_err(|err| OptionDocError::Io(format!("{}: {err}", path.display())))?;
    let mut buf = Vec::new();
    let limit = u64::try_from(MAX_OPTION_DOC_BYTES.saturating_add(1))
        .map_err(|_| OptionDocError::TooLarge)?;
    let mut handle = file.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|err| OptionDocError::Io(format!("{}: {err}", path.display())))?;
    if buf.len() > MAX_OPTION_DOC_BYTES {
        return Err(OptionDocError::TooLarge);
    }

    let doc: OptionDoc =
        serde_json::from_slice(&buf).map_err(|err| OptionDocError::Parse(err.to_string()))?;
    doc.validate()?;
    Ok(doc)
}
