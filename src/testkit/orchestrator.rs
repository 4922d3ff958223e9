//! Orchestrators wired against the simulated control plane.

use std::sync::Arc;

use crate::adapter::outbound::{MemoryTenantStore, SimulatedCluster};
use crate::application::TenantOrchestrator;
use crate::domain::WorkloadTemplate;
use crate::port::ClusterClient;

/// Tenant orchestrator over `cluster` with a fresh in-memory registry.
pub fn over(cluster: Arc<dyn ClusterClient>) -> TenantOrchestrator {
    TenantOrchestrator::new(
        cluster,
        Arc::new(MemoryTenantStore::new()),
        WorkloadTemplate::default(),
    )
}

/// Simulated cluster plus an orchestrator over it.
///
/// The cluster handle drives rollout progress from the test.
pub fn simulated() -> (Arc<SimulatedCluster>, TenantOrchestrator) {
    let cluster = Arc::new(SimulatedCluster::new());
    let orchestrator = over(cluster.clone());
    (cluster, orchestrator)
}
