// crates/oraplan-config/src/lib.rs
// ============================================================================
// Module: Oraplan Config Library
// Description: Public API surface for deployment request loading.
// Purpose: Expose strict TOML loading, schema generation, and examples.
// Dependencies: crate::{config, examples, schema}
// ============================================================================

//! ## Overview
//! The config crate loads deployment requests from TOML with strict size and
//! path limits and converts them into validated core types. Missing or
//! invalid configuration fails closed; nothing is provisioned from a request
//! that did not fully validate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::BackupConfig;
pub use config::ConfigError;
pub use config::CredentialsConfig;
pub use config::DatabaseConfig;
pub use config::DeploymentConfig;
pub use config::DeploymentMode;
pub use config::EngineConfig;
pub use config::IngressConfig;
pub use config::NetworkConfig;
pub use config::OptionsConfig;
pub use config::PasswordConfig;
pub use config::ReplicaConfig;
pub use config::RequestConfig;
pub use config::StorageConfig;
pub use config::load_request;
pub use config::request_from_toml;
pub use examples::request_toml_example;
pub use schema::request_schema;
