//! Outbound adapters (driven side).
//!
//! - [`kubernetes`] - control plane backed by a Kubernetes API server
//! - [`simulated`] - in-process control plane for offline runs and tests
//! - [`memory`] - in-memory tenant registry

pub mod kubernetes;
pub mod memory;
pub mod simulated;

pub use kubernetes::KubeCluster;
pub use memory::MemoryTenantStore;
pub use simulated::SimulatedCluster;
