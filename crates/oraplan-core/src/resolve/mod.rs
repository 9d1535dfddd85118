// crates/oraplan-core/src/resolve/mod.rs
// ============================================================================
// Module: Oraplan Resolution
// Description: Topology resolution engine and resolved plan types.
// Purpose: Derive the full resource specification set in one pass.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Resolution is a single synchronous pass over a validated request and its
//! external inputs. Plans are immutable after derivation; any change requires
//! re-resolution from a new request.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod engine;
pub mod plan;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::ResolveError;
pub use engine::TopologyResolver;
pub use plan::DeploymentPlan;
pub use plan::InstancePlan;
