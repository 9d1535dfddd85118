// crates/oraplan-providers/src/subnets.rs
// ============================================================================
// Module: JSON Subnet Source
// Description: Subnet discovery backed by a JSON inventory file.
// Purpose: Stand in for cloud discovery with the same filter contract.
// Dependencies: oraplan-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The JSON subnet source loads a subnet inventory file and returns the
//! candidates for a VPC that carry the private network tag, matching the
//! contract cloud discovery honors. It enforces path restrictions and size
//! limits to avoid resource exhaustion; IP-availability filtering stays in
//! the core.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use oraplan_core::PRIVATE_NETWORK_TAG;
use oraplan_core::SubnetCandidate;
use oraplan_core::SubnetSource;
use oraplan_core::SubnetSourceError;
use oraplan_core::VpcId;
use serde::Deserialize;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the JSON subnet source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonSubnetSourceConfig {
    /// Optional root directory for resolving the inventory path.
    pub root: Option<PathBuf>,
    /// Maximum inventory file size allowed, in bytes.
    pub max_bytes: usize,
}

impl Default for JsonSubnetSourceConfig {
    fn default() -> Self {
        Self {
            root: None,
            max_bytes: 1024 * 1024,
        }
    }
}

// ============================================================================
// SECTION: Source Implementation
// ============================================================================

/// Subnet discovery backed by a JSON inventory file.
pub struct JsonSubnetSource {
    /// Source configuration, including limits and root policy.
    config: JsonSubnetSourceConfig,
    /// Inventory file path, resolved against the root policy.
    file: String,
}

impl JsonSubnetSource {
    /// Creates a new JSON subnet source for one inventory file.
    #[must_use]
    pub fn new(config: JsonSubnetSourceConfig, file: impl Into<String>) -> Self {
        Self {
            config,
            file: file.into(),
        }
    }
}

impl SubnetSource for JsonSubnetSource {
    fn discover(&self, vpc_id: &VpcId) -> Result<Vec<SubnetCandidate>, SubnetSourceError> {
        let resolved = resolve_path(&self.config, &self.file)?;
        let content = read_file_limited(&resolved, self.config.max_bytes)?;
        let inventory: Vec<SubnetCandidate> = serde_json::from_slice(&content)
            .map_err(|_| SubnetSourceError::Source("invalid subnet inventory".to_string()))?;

        let (tag_key, tag_value) = PRIVATE_NETWORK_TAG;
        Ok(inventory
            .into_iter()
            .filter(|candidate| {
                candidate.vpc_id == *vpc_id
                    && candidate.tags.get(tag_key).map(String::as_str) == Some(tag_value)
            })
            .collect())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the inventory path against the configured root policy.
fn resolve_path(
    config: &JsonSubnetSourceConfig,
    file: &str,
) -> Result<PathBuf, SubnetSourceError> {
    let candidate = PathBuf::from(file);
    if let Some(root) = &config.root {
        let root = root
            .canonicalize()
            .map_err(|_| SubnetSourceError::Source("invalid inventory root".to_string()))?;
        let joined = if candidate.is_absolute() { candidate } else { root.join(candidate) };
        let resolved = joined
            .canonicalize()
            .map_err(|_| SubnetSourceError::Source("unable to resolve inventory file".to_string()))?;
        if !resolved.starts_with(&root) {
            return Err(SubnetSourceError::Source("inventory path escapes root".to_string()));
        }
        return Ok(resolved);
    }
    candidate
        .canonicalize()
        .map_err(|_| SubnetSourceError::Source("unable to resolve inventory file".to_string()))
}

/// Reads a file while enforcing a maximum byte limit.
fn read_file_limited(path: &Path, max_bytes: usize) -> Result<Vec<u8>, SubnetSourceError> {
    let file = File::open(path)
        .map_err(|_| SubnetSourceError::Source("unable to open inventory file".to_string()))?;
    let mut buf = Vec::new();
    let limit = max_bytes.saturating_add(1);
    let limit = u64::try_from(limit)
        .map_err(|_| SubnetSourceError::Source("inventory size limit exceeds u64".to_string()))?;
    let mut handle = file.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|_| SubnetSourceError::Source("unable to read inventory file".to_string()))?;
    if buf.len() > max_bytes {
        return Err(SubnetSourceError::Source("inventory file exceeds size limit".to_string()));
    }
    Ok(buf)
}
