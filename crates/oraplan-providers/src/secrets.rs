// crates/oraplan-providers/src/secrets.rs
// ============================================================================
// Module: File Secret Sink
// Description: Directory-backed secret store for the one-shot credential write.
// Purpose: Implement the secret sink contract with prior-version deletion.
// Dependencies: oraplan-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The file secret sink maps each secret path to a directory under its root
//! and writes one versioned JSON payload per store call. When a record asks
//! for prior-version deletion, existing versions are removed before the
//! write. Paths are confined to the root; traversal components are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use oraplan_core::SecretRecord;
use oraplan_core::SecretSink;
use oraplan_core::SecretSinkError;
use serde::Deserialize;
use serde_json::json;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the file secret sink.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileSecretSinkConfig {
    /// Root directory all secret paths resolve under.
    pub root: PathBuf,
}

// ============================================================================
// SECTION: Sink Implementation
// ============================================================================

/// Directory-backed secret sink.
pub struct FileSecretSink {
    /// Sink configuration.
    config: FileSecretSinkConfig,
}

impl FileSecretSink {
    /// Creates a new file secret sink rooted at the configured directory.
    #[must_use]
    pub const fn new(config: FileSecretSinkConfig) -> Self {
        Self {
            config,
        }
    }
}

impl SecretSink for FileSecretSink {
    fn store(&self, record: &SecretRecord) -> Result<(), SecretSinkError> {
        let dir = resolve_secret_dir(&self.config.root, &record.path)?;
        fs::create_dir_all(&dir)
            .map_err(|err| SecretSinkError::Sink(format!("create {}: {err}", dir.display())))?;

        let mut versions = existing_versions(&dir)?;
        if record.delete_prior_versions {
            for version in &versions {
                fs::remove_file(dir.join(format!("v{version}.json"))).map_err(|err| {
                    SecretSinkError::Sink(format!("delete prior version: {err}"))
                })?;
            }
            versions.clear();
        }

        let next = versions.iter().max().map_or(1, |max| max + 1);
        let payload = json!({
            "username": record.username,
            "password": record.password,
            "host": record.host,
            "port": record.port,
        });
        let text = serde_json::to_string_pretty(&payload)
            .map_err(|err| SecretSinkError::Sink(format!("serialize secret: {err}")))?;
        let target = dir.join(format!("v{next}.json"));
        fs::write(&target, text)
            .map_err(|err| SecretSinkError::Sink(format!("write {}: {err}", target.display())))?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves a secret path under the root, rejecting traversal components.
fn resolve_secret_dir(root: &Path, secret_path: &str) -> Result<PathBuf, SecretSinkError> {
    if secret_path.trim().is_empty() {
        return Err(SecretSinkError::Sink("secret path is empty".to_string()));
    }
    let relative = PathBuf::from(secret_path);
    for component in relative.components() {
        match component {
            Component::Normal(_) => {}
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(SecretSinkError::Sink("secret path escapes root".to_string()));
            }
        }
    }
    Ok(root.join(relative))
}

/// Lists existing version numbers in a secret directory.
fn existing_versions(dir: &Path) -> Result<Vec<u64>, SecretSinkError> {
    let mut versions = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(versions),
    };
    for entry in entries {
        let entry =
            entry.map_err(|err| SecretSinkError::Sink(format!("list versions: {err}")))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if let Some(stem) = name.strip_prefix('v')
            && let Some(number) = stem.strip_suffix(".json")
            && let Ok(version) = number.parse::<u64>()
        {
            versions.push(version);
        }
    }
    Ok(versions)
}
