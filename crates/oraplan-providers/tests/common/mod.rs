// crates/oraplan-providers/tests/common/mod.rs
// =============================================================================
// Module: Provider Test Helpers
// Description: Shared fixtures for file-backed provider tests.
// Purpose: Reduce duplication across integration tests for oraplan-providers.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use oraplan_core::Environment;
use oraplan_core::SecretRecord;
use oraplan_core::secret_path;

/// Returns a JSON subnet inventory with mixed VPCs and tags.
pub fn inventory_json() -> String {
    String::from(
        r#"[
  {
    "subnet_id": "subnet-a",
    "vpc_id": "vpc-0abc",
    "availability_zone": "eu-west-1a",
    "available_ip_count": 200,
    "tags": {"Network": "Private"}
  },
  {
    "subnet_id": "subnet-b",
    "vpc_id": "vpc-0abc",
    "availability_zone": "eu-west-1b",
    "available_ip_count": 120,
    "tags": {"Network": "Public"}
  },
  {
    "subnet_id": "subnet-c",
    "vpc_id": "vpc-0def",
    "availability_zone": "eu-west-1c",
    "available_ip_count": 80,
    "tags": {"Network": "Private"}
  },
  {
    "subnet_id": "subnet-d",
    "vpc_id": "vpc-0abc",
    "availability_zone": "eu-west-1c",
    "available_ip_count": 3,
    "tags": {"Network": "Private"}
  }
]"#,
    )
}

/// Returns a valid option document in JSON form.
pub fn option_doc_json() -> String {
    String::from(
        r#"{
  "parameter_group_parameters": [
    {"name": "open_cursors", "value": "300"},
    {"name": "processes", "value": "600", "apply_method": "pending-reboot"}
  ],
  "option_group_options": [
    {"option_name": "STATSPACK"}
  ],
  "ssl_option": [
    {"option_name": "SSL", "port": 2484, "settings": [
      {"name": "SQLNET.SSL_VERSION", "value": "1.2"}
    ]}
  ]
}"#,
    )
}

/// Returns a secret record addressed under the non-production prefix.
pub fn secret_record(delete_prior_versions: bool) -> SecretRecord {
    SecretRecord {
        path: secret_path(Environment::NonProduction, "ordb-01"),
        username: "admin".to_string(),
        password: "Xy7#kPq2wL9!mRt4aBc8".to_string(),
        host: "ordb-01".to_string(),
        port: 1521,
        delete_prior_versions,
    }
}
