//! Composition root: builds the orchestrator from configuration.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::{KubeCluster, MemoryTenantStore, SimulatedCluster};
use crate::application::TenantOrchestrator;
use crate::error::Result;
use crate::infrastructure::config::cluster::{ClusterBackend, ClusterConfig};
use crate::infrastructure::config::settings::Config;
use crate::port::{ClusterClient, TenantStore};

/// Build the control-plane client selected by `[cluster] backend`.
///
/// The Kubernetes backend resolves credentials from the ambient kubeconfig or
/// in-cluster service account; failure surfaces as `ClusterError::Unavailable`.
pub async fn build_cluster(config: &ClusterConfig) -> Result<Arc<dyn ClusterClient>> {
    let cluster: Arc<dyn ClusterClient> = match config.backend {
        ClusterBackend::Kubernetes => Arc::new(KubeCluster::connect().await?),
        ClusterBackend::Simulated => Arc::new(
            SimulatedCluster::new().with_ready_on_create(config.simulated.ready_on_create),
        ),
    };
    info!(backend = cluster.backend_name(), "Control plane client ready");
    Ok(cluster)
}

/// Wire a [`TenantOrchestrator`] against an explicit control-plane client.
#[must_use]
pub fn build_orchestrator_with(
    config: &Config,
    cluster: Arc<dyn ClusterClient>,
) -> TenantOrchestrator {
    let store: Arc<dyn TenantStore> = Arc::new(MemoryTenantStore::new());
    TenantOrchestrator::new(cluster, store, config.workload.clone())
}

/// Build the orchestrator described by `config`.
pub async fn build_orchestrator(config: &Config) -> Result<TenantOrchestrator> {
    let cluster = build_cluster(&config.cluster).await?;
    Ok(build_orchestrator_with(config, cluster))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstanceId, InstanceStatus, TenantId};
    use crate::port::TenantOperations;
    use crate::testkit;

    #[tokio::test]
    async fn simulated_backend_is_selected() {
        let orchestrator = build_orchestrator(&testkit::config::simulated())
            .await
            .unwrap();
        assert_eq!(orchestrator.backend_name(), "simulated");
    }

    #[tokio::test]
    async fn ready_on_create_reaches_simulated_backend() {
        let orchestrator = build_orchestrator(&testkit::config::simulated_ready())
            .await
            .unwrap();
        let tenant = TenantId::new("acme");
        let instance = InstanceId::new("web");
        orchestrator.create_tenant(&tenant, "Acme").await.unwrap();
        orchestrator.create_instance(&tenant, &instance).await.unwrap();

        let current = orchestrator.get_instance(&tenant, &instance).await.unwrap();
        assert_eq!(current.status(), InstanceStatus::Running);
    }

    #[tokio::test]
    async fn workload_template_reaches_instances() {
        let mut config = testkit::config::simulated();
        config.workload.image = "tenant-app:canary".into();

        let orchestrator = build_orchestrator(&config).await.unwrap();
        assert_eq!(orchestrator.instances().template().image, "tenant-app:canary");

        let tenant = orchestrator
            .create_tenant(&TenantId::new("acme"), "Acme")
            .await
            .unwrap();
        assert!(tenant.is_active());
    }
}
