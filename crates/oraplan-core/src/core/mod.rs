// crates/oraplan-core/src/core/mod.rs
// ============================================================================
// Module: Oraplan Core Types
// Description: Canonical deployment request and resource specification types.
// Purpose: Provide stable, serializable types for topology resolution.
// Dependencies: rand, serde
// ============================================================================

//! ## Overview
//! Oraplan core types define deployment requests, the option/parameter
//! document, network and credential models, and the resource specifications a
//! resolved plan emits. These types are the canonical source of truth for any
//! derived surfaces (CLI output, schemas, provisioning adapters).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod credentials;
pub mod hashing;
pub mod identifiers;
pub mod naming;
pub mod network;
pub mod options;
pub mod resources;
pub mod topology;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use credentials::Environment;
pub use credentials::MASTER_USERNAME;
pub use credentials::PasswordError;
pub use credentials::PasswordPolicy;
pub use credentials::SecretRecord;
pub use credentials::generate_password;
pub use credentials::secret_path;
pub use hashing::FINGERPRINT_ALGORITHM;
pub use hashing::FingerprintError;
pub use hashing::PlanFingerprint;
pub use hashing::fingerprint_canonical_json;
pub use identifiers::DbIdentifier;
pub use identifiers::IdentifierError;
pub use identifiers::KmsKeyId;
pub use identifiers::MAX_DB_IDENTIFIER_LENGTH;
pub use identifiers::SourceDbArn;
pub use identifiers::SubnetId;
pub use identifiers::VpcId;
pub use naming::MAX_INSTANCES_PER_REQUEST;
pub use naming::NamingError;
pub use naming::final_snapshot_identifier;
pub use naming::instance_identifiers;
pub use network::DEFAULT_DB_PORT;
pub use network::IngressRule;
pub use network::MIN_AVAILABLE_IP_ADDRESSES;
pub use network::NetworkSpec;
pub use network::PRIVATE_NETWORK_TAG;
pub use network::SecurityRule;
pub use network::SecurityRuleSet;
pub use network::SubnetCandidate;
pub use network::expand_security_rules;
pub use network::filter_usable_subnets;
pub use options::ApplyMethod;
pub use options::DEFAULT_NON_SSL_PORT;
pub use options::DEFAULT_SSL_PORT;
pub use options::OptionDoc;
pub use options::OptionDocError;
pub use options::OptionSetting;
pub use options::OptionSpec;
pub use options::ParameterSpec;
pub use options::ResolvedOption;
pub use resources::DbInstanceSpec;
pub use resources::LogGroupSpec;
pub use resources::LogKind;
pub use resources::OptionGroupSpec;
pub use resources::ParameterGroupSpec;
pub use resources::SecurityGroupSpec;
pub use resources::SubnetGroupSpec;
pub use resources::TagMap;
pub use resources::merge_tags;
pub use topology::BackupSpec;
pub use topology::CredentialPolicy;
pub use topology::CrossRegionSpec;
pub use topology::DeploymentRequest;
pub use topology::EngineFamily;
pub use topology::EngineSpec;
pub use topology::OptionBinding;
pub use topology::PrimarySpec;
pub use topology::ReadReplicaSpec;
pub use topology::RequestError;
pub use topology::StorageKind;
pub use topology::StorageSpec;
pub use topology::Topology;
