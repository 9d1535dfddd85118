// crates/oraplan-config/src/examples.rs
// ============================================================================
// Module: Request Examples
// Description: Canonical example request payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical examples for Oraplan deployment requests. Outputs are
//! deterministic and kept in sync with the schema.

/// Returns a canonical example `oraplan.toml` request.
#[must_use]
pub fn request_toml_example() -> String {
    String::from(
        r#"[deployment]
identifier = "ordb"
instance_count = 2
mode = "primary"
skip_final_snapshot = false
log_retention_days = 30
# kms_key = "arn:aws:kms:eu-west-1:123456789012:key/..."

[engine]
family = "oracle_ee"
version = "19.0.0.0.ru-2024-01.rur-2024-01.r1"

[storage]
kind = "gp3"
allocated_gb = 100
max_allocated_gb = 500
# iops = 3000

[database]
name = "ORCL"
# port = 1521

[options]
enable_ssl = false

[credentials]
environment = "non_production"
delete_prior_versions = true

[credentials.password]
length = 20
min_upper = 2
min_lower = 2
min_digit = 2
min_special = 2

[backup]
retention_days = 14
window = "03:00-04:00"

[network]
vpc_id = "vpc-0abc1234"

[[network.ingress]]
description = "application subnets"
cidr_blocks = ["10.0.0.0/16"]

[tags]
service = "billing"
"#,
    )
}
