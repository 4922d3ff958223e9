//! Application services: the tenant/instance lifecycle orchestrator.
//!
//! ```text
//! TenantOrchestrator ──▶ InstanceOrchestrator ──▶ ClusterClient
//!        │
//!        └──▶ TenantStore
//! ```

pub mod instance;
pub mod tenant;

pub use instance::InstanceOrchestrator;
pub use tenant::TenantOrchestrator;
