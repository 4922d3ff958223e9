//! Tenant registry and instance gatekeeping.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::instance::InstanceOrchestrator;
use crate::domain::workload::namespace_labels;
use crate::domain::{Instance, InstanceId, Tenant, TenantId, TenantStatus, WorkloadTemplate};
use crate::error::{Error, Result};
use crate::port::{ClusterClient, TenantOperations, TenantStore};

/// Owns tenants and routes instance operations to the [`InstanceOrchestrator`].
///
/// Tenant records live in the injected [`TenantStore`]; instances live only
/// in the control plane.
pub struct TenantOrchestrator {
    cluster: Arc<dyn ClusterClient>,
    store: Arc<dyn TenantStore>,
    instances: InstanceOrchestrator,
}

impl TenantOrchestrator {
    pub fn new(
        cluster: Arc<dyn ClusterClient>,
        store: Arc<dyn TenantStore>,
        template: WorkloadTemplate,
    ) -> Self {
        let instances = InstanceOrchestrator::new(Arc::clone(&cluster), template);
        Self {
            cluster,
            store,
            instances,
        }
    }

    /// The instance orchestrator this tenant orchestrator delegates to.
    #[must_use]
    pub fn instances(&self) -> &InstanceOrchestrator {
        &self.instances
    }

    /// Backend name of the control plane in use.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.cluster.backend_name()
    }

    async fn ensure_namespace(&self, id: &TenantId) -> Result<()> {
        let namespace = id.namespace();
        match self
            .cluster
            .create_namespace(&namespace, &namespace_labels(id))
            .await
        {
            Ok(()) => {
                info!(tenant = %id, namespace = %namespace, "Namespace created");
                Ok(())
            }
            Err(err) if err.is_already_exists() => {
                debug!(tenant = %id, namespace = %namespace, "Namespace already exists");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl TenantOperations for TenantOrchestrator {
    /// Ensure the tenant's namespace and register the tenant as active.
    ///
    /// Registering an existing identifier returns the stored record as is,
    /// including its current activation state.
    async fn create_tenant(&self, id: &TenantId, name: &str) -> Result<Tenant> {
        self.ensure_namespace(id).await?;

        let candidate = Tenant::new(id.clone(), name);
        let stored = self.store.insert_if_absent(candidate.clone()).await?;
        if stored == candidate {
            info!(tenant = %id, name = %name, "Tenant created");
        } else {
            debug!(tenant = %id, "Tenant already registered");
        }
        Ok(stored)
    }

    async fn get_tenant(&self, id: &TenantId) -> Result<Tenant> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::TenantNotFound {
                tenant_id: id.clone(),
            })
    }

    async fn list_tenants(&self) -> Result<Vec<Tenant>> {
        self.store.list().await
    }

    async fn set_tenant_status(&self, id: &TenantId, status: TenantStatus) -> Result<Tenant> {
        let tenant = self
            .store
            .update_status(id, status)
            .await?
            .ok_or_else(|| Error::TenantNotFound {
                tenant_id: id.clone(),
            })?;
        info!(tenant = %id, status = %status, "Tenant status changed");
        Ok(tenant)
    }

    /// Create an instance for an active tenant.
    ///
    /// Unknown and non-active tenants are rejected before the control plane
    /// is contacted.
    async fn create_instance(&self, tenant: &TenantId, instance: &InstanceId) -> Result<Instance> {
        let record = self.get_tenant(tenant).await?;
        if !record.is_active() {
            return Err(Error::TenantNotActive {
                tenant_id: tenant.clone(),
                status: record.status(),
            });
        }

        self.instances.create_instance(tenant, instance).await
    }

    async fn get_instance(&self, tenant: &TenantId, instance: &InstanceId) -> Result<Instance> {
        self.instances.get_instance(tenant, instance).await
    }

    async fn list_instances(&self, tenant: &TenantId) -> Result<Vec<Instance>> {
        self.instances.list_instances(tenant).await
    }

    async fn delete_instance(&self, tenant: &TenantId, instance: &InstanceId) -> Result<()> {
        self.instances.delete_instance(tenant, instance).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::SimulatedCluster;
    use crate::domain::InstanceStatus;
    use crate::testkit;

    fn orchestrator() -> (Arc<SimulatedCluster>, TenantOrchestrator) {
        testkit::orchestrator::simulated()
    }

    #[tokio::test]
    async fn create_tenant_provisions_namespace() {
        let (cluster, orchestrator) = orchestrator();
        let tenant = orchestrator
            .create_tenant(&TenantId::new("acme"), "Acme Corporation")
            .await
            .unwrap();

        assert_eq!(tenant.namespace(), "tenant-acme");
        assert_eq!(tenant.status(), TenantStatus::Active);
        assert!(cluster.has_namespace("tenant-acme"));
    }

    #[tokio::test]
    async fn create_tenant_twice_returns_same_record() {
        let (_, orchestrator) = orchestrator();
        let id = TenantId::new("acme");

        let first = orchestrator.create_tenant(&id, "Acme").await.unwrap();
        let second = orchestrator.create_tenant(&id, "Acme").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(orchestrator.list_tenants().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_tenant_keeps_namespace_created_elsewhere() {
        let (cluster, orchestrator) = orchestrator();
        cluster
            .create_namespace("tenant-acme", &Default::default())
            .await
            .unwrap();

        let tenant = orchestrator
            .create_tenant(&TenantId::new("acme"), "Acme")
            .await
            .unwrap();
        assert_eq!(tenant.namespace(), "tenant-acme");
    }

    #[tokio::test]
    async fn get_unknown_tenant_is_not_found() {
        let (_, orchestrator) = orchestrator();
        let err = orchestrator
            .get_tenant(&TenantId::new("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TenantNotFound { .. }));
    }

    #[tokio::test]
    async fn instance_on_unknown_tenant_is_rejected() {
        let (cluster, orchestrator) = orchestrator();
        let err = orchestrator
            .create_instance(&TenantId::new("ghost"), &InstanceId::new("a"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::TenantNotFound { .. }));
        assert_eq!(cluster.workload_count("tenant-ghost"), 0);
    }

    #[tokio::test]
    async fn instance_on_inactive_tenant_is_rejected() {
        let (cluster, orchestrator) = orchestrator();
        let id = TenantId::new("acme");
        orchestrator.create_tenant(&id, "Acme").await.unwrap();
        orchestrator
            .set_tenant_status(&id, TenantStatus::Inactive)
            .await
            .unwrap();

        let err = orchestrator
            .create_instance(&id, &InstanceId::new("a"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TenantNotActive {
                status: TenantStatus::Inactive,
                ..
            }
        ));
        assert_eq!(cluster.workload_count("tenant-acme"), 0);
    }

    #[tokio::test]
    async fn reactivated_tenant_can_create_instances() {
        let (_, orchestrator) = orchestrator();
        let id = TenantId::new("acme");
        orchestrator.create_tenant(&id, "Acme").await.unwrap();
        orchestrator
            .set_tenant_status(&id, TenantStatus::Suspended)
            .await
            .unwrap();
        orchestrator
            .set_tenant_status(&id, TenantStatus::Active)
            .await
            .unwrap();

        let instance = orchestrator
            .create_instance(&id, &InstanceId::new("a"))
            .await
            .unwrap();
        assert_eq!(instance.status(), InstanceStatus::Creating);
        assert_eq!(instance.namespace(), "tenant-acme");
    }

    #[tokio::test]
    async fn set_status_on_unknown_tenant_is_not_found() {
        let (_, orchestrator) = orchestrator();
        let err = orchestrator
            .set_tenant_status(&TenantId::new("ghost"), TenantStatus::Suspended)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
