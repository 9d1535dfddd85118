// crates/oraplan-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for request loading tests.
// Purpose: Reduce duplication across integration tests for oraplan-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use oraplan_config::ConfigError;
use oraplan_config::request_from_toml;
use oraplan_core::DeploymentRequest;

/// Parses TOML text into a validated deployment request.
pub fn request(toml_str: &str) -> Result<DeploymentRequest, ConfigError> {
    request_from_toml(toml_str)
}

/// Returns a minimal primary-mode request document.
pub fn primary_toml() -> String {
    String::from(
        r#"[deployment]
identifier = "ordb"
mode = "primary"

[engine]
family = "oracle_ee"
version = "19.0.0.0"

[storage]
kind = "gp3"
allocated_gb = 100

[database]
name = "ORCL"

[credentials]
environment = "non_production"

[backup]
retention_days = 14

[network]
vpc_id = "vpc-0abc"

[[network.ingress]]
cidr_blocks = ["10.0.0.0/16"]
"#,
    )
}

/// Returns a minimal read-replica request document.
pub fn replica_toml() -> String {
    String::from(
        r#"[deployment]
identifier = "ordb"
mode = "read_replica"

[replica]
source_identifier = "ordb-source"

[network]
[[network.ingress]]
cidr_blocks = ["10.0.0.0/16"]
"#,
    )
}

/// Returns a minimal cross-region request document.
pub fn cross_region_toml() -> String {
    String::from(
        r#"[deployment]
identifier = "ordb"
mode = "cross_region_replica"

[replica]
source_arn = "arn:aws:rds:eu-west-1:123456789012:db:ordb-source"

[storage]
kind = "gp3"
allocated_gb = 100

[backup]
retention_days = 7

[network]
vpc_id = "vpc-0abc"
"#,
    )
}
