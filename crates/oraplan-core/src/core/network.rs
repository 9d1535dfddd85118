// crates/oraplan-core/src/core/network.rs
// ============================================================================
// Module: Oraplan Network Model
// Description: Subnet candidates, ingress rule expansion, and the fixed egress rule.
// Purpose: Derive security rules and usable subnet sets for a deployment.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Subnet candidates are discovered externally (by VPC and the private
//! network tag) and filtered here by available IP address count. Ingress
//! rules expand one-to-one with configured entries, defaulting port and
//! protocol; a single allow-all egress rule is always appended regardless of
//! ingress configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::SubnetId;
use crate::core::identifiers::VpcId;
use crate::core::resources::TagMap;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum available IP addresses for a subnet to be usable.
pub const MIN_AVAILABLE_IP_ADDRESSES: u32 = 5;

/// Default Oracle listener port for security rules.
pub const DEFAULT_DB_PORT: u16 = 1521;

/// Default transport protocol for ingress rules.
const DEFAULT_PROTOCOL: &str = "tcp";

/// Tag key/value marking private subnets during discovery.
pub const PRIVATE_NETWORK_TAG: (&str, &str) = ("Network", "Private");

// ============================================================================
// SECTION: Network Specification
// ============================================================================

/// Network placement and ingress configuration for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// VPC to place the deployment in.
    pub vpc_id: Option<VpcId>,
    /// Ordered ingress rule specifications.
    pub ingress: Vec<IngressRule>,
}

/// One configured ingress rule; unset fields take documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    /// Optional rule description.
    pub description: Option<String>,
    /// Range start; defaults to the Oracle listener port.
    pub from_port: Option<u16>,
    /// Range end; defaults to the Oracle listener port.
    pub to_port: Option<u16>,
    /// Transport protocol; defaults to `tcp`.
    pub protocol: Option<String>,
    /// Peer CIDR blocks.
    pub cidr_blocks: Vec<String>,
    /// Peer security group identifiers.
    pub security_group_ids: Vec<String>,
}

// ============================================================================
// SECTION: Subnet Candidates
// ============================================================================

/// Externally discovered subnet candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetCandidate {
    /// Subnet identifier.
    pub subnet_id: SubnetId,
    /// Owning VPC identifier.
    pub vpc_id: VpcId,
    /// Availability zone name.
    pub availability_zone: String,
    /// Currently available IP address count.
    pub available_ip_count: u32,
    /// Subnet tags as reported by discovery.
    pub tags: TagMap,
}

/// Retains only candidates with enough available IP addresses.
///
/// An empty result is fatal for downstream plan construction; the resolver
/// rejects it rather than provisioning into exhausted subnets.
#[must_use]
pub fn filter_usable_subnets(candidates: &[SubnetCandidate]) -> Vec<SubnetCandidate> {
    candidates
        .iter()
        .filter(|candidate| candidate.available_ip_count > MIN_AVAILABLE_IP_ADDRESSES)
        .cloned()
        .collect()
}

// ============================================================================
// SECTION: Security Rules
// ============================================================================

/// Fully resolved security rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRule {
    /// Optional rule description.
    pub description: Option<String>,
    /// Range start.
    pub from_port: u16,
    /// Range end.
    pub to_port: u16,
    /// Transport protocol, or `-1` for all protocols.
    pub protocol: String,
    /// Peer CIDR blocks.
    pub cidr_blocks: Vec<String>,
    /// Peer security group identifiers.
    pub security_group_ids: Vec<String>,
}

/// Resolved ingress and egress rules for one security group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRuleSet {
    /// Expanded ingress rules in configuration order.
    pub ingress: Vec<SecurityRule>,
    /// Egress rules; always exactly the fixed allow-all rule.
    pub egress: Vec<SecurityRule>,
}

/// Expands configured ingress rules and appends the fixed egress rule.
///
/// Expansion preserves configuration order and yields exactly one resolved
/// rule per entry. The egress rule is appended exactly once for any ingress
/// count, including zero.
#[must_use]
pub fn expand_security_rules(rules: &[IngressRule]) -> SecurityRuleSet {
    let ingress = rules
        .iter()
        .map(|rule| SecurityRule {
            description: rule.description.clone(),
            from_port: rule.from_port.unwrap_or(DEFAULT_DB_PORT),
            to_port: rule.to_port.unwrap_or(DEFAULT_DB_PORT),
            protocol: rule.protocol.clone().unwrap_or_else(|| DEFAULT_PROTOCOL.to_string()),
            cidr_blocks: rule.cidr_blocks.clone(),
            security_group_ids: rule.security_group_ids.clone(),
        })
        .collect();
    SecurityRuleSet {
        ingress,
        egress: vec![allow_all_egress()],
    }
}

/// Returns the fixed allow-all egress rule.
fn allow_all_egress() -> SecurityRule {
    SecurityRule {
        description: Some("allow all outbound".to_string()),
        from_port: 0,
        to_port: 0,
        protocol: "-1".to_string(),
        cidr_blocks: vec!["0.0.0.0/0".to_string()],
        security_group_ids: Vec::new(),
    }
}
