// crates/oraplan-config/src/schema.rs
// ============================================================================
// Module: Request Schemas
// Description: JSON schema builders for oraplan.toml.
// Purpose: Provide the canonical validation schema for request documents.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for Oraplan deployment requests. The
//! schema is generated from the canonical config model and is used by
//! tooling, docs, and validation pipelines.

use serde_json::Value;
use serde_json::json;

use crate::config::MAX_INGRESS_RULES;
use crate::config::MAX_TAGS;

/// Returns the JSON schema for `oraplan.toml`.
#[must_use]
pub fn request_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "oraplan://schemas/request.schema.json",
        "title": "Oraplan Deployment Request",
        "description": "Deployment request for the Oraplan topology planner.",
        "type": "object",
        "properties": {
            "deployment": deployment_schema(),
            "engine": engine_schema(),
            "storage": storage_schema(),
            "database": database_schema(),
            "options": options_schema(),
            "credentials": credentials_schema(),
            "backup": backup_schema(),
            "replica": replica_schema(),
            "network": network_schema(),
            "tags": tags_schema(),
        },
        "required": ["deployment"],
        "additionalProperties": false
    })
}

/// Schema for the `[deployment]` section.
fn deployment_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "identifier": {
                "type": "string",
                "pattern": "^[a-z][a-z0-9-]{0,62}$"
            },
            "instance_count": {
                "type": "integer",
                "minimum": 1,
                "maximum": 9,
                "default": 1
            },
            "mode": {
                "enum": ["primary", "read_replica", "cross_region_replica"]
            },
            "skip_final_snapshot": { "type": "boolean", "default": false },
            "final_snapshot_override": { "type": "string" },
            "log_retention_days": { "type": "integer", "minimum": 1, "default": 30 },
            "kms_key": { "type": "string", "minLength": 1 }
        },
        "required": ["identifier", "mode"],
        "additionalProperties": false
    })
}

/// Schema for the `[engine]` section.
fn engine_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "family": { "enum": ["oracle_ee", "oracle_se2"] },
            "version": { "type": "string", "minLength": 1 }
        },
        "required": ["family", "version"],
        "additionalProperties": false
    })
}

/// Schema for the `[storage]` section.
fn storage_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "kind": { "enum": ["gp2", "gp3", "io1"] },
            "allocated_gb": { "type": "integer", "minimum": 1 },
            "max_allocated_gb": { "type": "integer", "minimum": 1 },
            "iops": { "type": "integer", "minimum": 1000 }
        },
        "required": ["kind", "allocated_gb"],
        "additionalProperties": false
    })
}

/// Schema for the `[database]` section.
fn database_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "pattern": "^[A-Za-z][A-Za-z0-9]{0,7}$" },
            "port": { "type": "integer", "minimum": 1150, "maximum": 65535 }
        },
        "required": ["name"],
        "additionalProperties": false
    })
}

/// Schema for the `[options]` section.
fn options_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "enable_ssl": { "type": "boolean", "default": false }
        },
        "additionalProperties": false
    })
}

/// Schema for the `[credentials]` section.
fn credentials_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "environment": { "enum": ["production", "non_production"] },
            "delete_prior_versions": { "type": "boolean", "default": false },
            "password": {
                "type": "object",
                "properties": {
                    "length": { "type": "integer", "minimum": 8, "maximum": 128 },
                    "min_upper": { "type": "integer", "minimum": 0 },
                    "min_lower": { "type": "integer", "minimum": 0 },
                    "min_digit": { "type": "integer", "minimum": 0 },
                    "min_special": { "type": "integer", "minimum": 0 }
                },
                "required": ["length"],
                "additionalProperties": false
            }
        },
        "required": ["environment"],
        "additionalProperties": false
    })
}

/// Schema for the `[backup]` section.
fn backup_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "retention_days": { "type": "integer", "minimum": 0, "maximum": 35 },
            "window": {
                "type": "string",
                "pattern": "^[0-2][0-9]:[0-5][0-9]-[0-2][0-9]:[0-5][0-9]$"
            }
        },
        "required": ["retention_days"],
        "additionalProperties": false
    })
}

/// Schema for the `[replica]` section.
fn replica_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "source_identifier": { "type": "string", "pattern": "^[a-z][a-z0-9-]{0,62}$" },
            "source_arn": { "type": "string", "minLength": 1 }
        },
        "additionalProperties": false
    })
}

/// Schema for the `[network]` section.
fn network_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "vpc_id": { "type": "string", "minLength": 1 },
            "ingress": {
                "type": "array",
                "maxItems": MAX_INGRESS_RULES,
                "items": {
                    "type": "object",
                    "properties": {
                        "description": { "type": "string" },
                        "from_port": { "type": "integer", "minimum": 0, "maximum": 65535 },
                        "to_port": { "type": "integer", "minimum": 0, "maximum": 65535 },
                        "protocol": { "type": "string" },
                        "cidr_blocks": { "type": "array", "items": { "type": "string" } },
                        "security_group_ids": { "type": "array", "items": { "type": "string" } }
                    },
                    "additionalProperties": false
                }
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the `[tags]` table.
fn tags_schema() -> Value {
    json!({
        "type": "object",
        "maxProperties": MAX_TAGS,
        "additionalProperties": { "type": "string" }
    })
}
