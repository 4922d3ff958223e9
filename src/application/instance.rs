//! Instance lifecycle on top of the control-plane port.
//!
//! An instance is a (Deployment, Service) pair named `instance-<id>` in its
//! tenant's namespace. Nothing is cached here: every read goes to the
//! control plane and derives status from the replica counts it reports.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::workload::{matches_selector, tenant_selector, workload_labels};
use crate::domain::{
    derive_status, Instance, InstanceId, InstanceStatus, TenantId, WorkloadObservation,
    WorkloadSpec, WorkloadTemplate,
};
use crate::error::{Error, Result};
use crate::port::ClusterClient;

/// Realizes tenant instances as cluster workloads.
pub struct InstanceOrchestrator {
    cluster: Arc<dyn ClusterClient>,
    template: WorkloadTemplate,
}

impl InstanceOrchestrator {
    /// Create an orchestrator that builds every workload from `template`.
    pub fn new(cluster: Arc<dyn ClusterClient>, template: WorkloadTemplate) -> Self {
        Self { cluster, template }
    }

    /// Workload template applied to new instances.
    #[must_use]
    pub fn template(&self) -> &WorkloadTemplate {
        &self.template
    }

    /// Create the workload backing `instance`.
    ///
    /// A workload that already exists counts as success and is not compared
    /// against the template. The returned instance always reports
    /// [`InstanceStatus::Creating`]; the next read tells the real state.
    pub async fn create_instance(
        &self,
        tenant: &TenantId,
        instance: &InstanceId,
    ) -> Result<Instance> {
        let spec = WorkloadSpec::for_instance(&self.template, tenant, instance);
        let namespace = tenant.namespace();

        match self.cluster.create_workload(&namespace, &spec).await {
            Ok(()) => info!(
                tenant = %tenant,
                instance = %instance,
                namespace = %namespace,
                "Instance created"
            ),
            Err(err) if err.is_already_exists() => debug!(
                tenant = %tenant,
                instance = %instance,
                "Instance already exists"
            ),
            Err(err) => return Err(err.into()),
        }

        Ok(Instance::new(
            instance.clone(),
            tenant.clone(),
            InstanceStatus::Creating,
            Utc::now(),
        ))
    }

    /// Read one instance from the control plane.
    ///
    /// The creation timestamp comes from the deployment's metadata, the same
    /// source [`list_instances`](Self::list_instances) uses. A deployment
    /// with the right name but without this instance's identity labels is
    /// not an instance and reads as not found.
    pub async fn get_instance(&self, tenant: &TenantId, instance: &InstanceId) -> Result<Instance> {
        let namespace = tenant.namespace();
        let name = instance.resource_name();
        let not_found = || Error::InstanceNotFound {
            tenant_id: tenant.clone(),
            instance_id: instance.clone(),
        };

        match self.cluster.read_workload(&namespace, &name).await {
            Ok(observation)
                if matches_selector(&observation.labels, &workload_labels(tenant, instance)) =>
            {
                Ok(project(tenant, instance.clone(), &observation))
            }
            Ok(_) => {
                debug!(
                    namespace = %namespace,
                    name = %name,
                    "Ignoring workload without instance labels"
                );
                Err(not_found())
            }
            Err(err) if err.is_not_found() => Err(not_found()),
            Err(err) => Err(err.into()),
        }
    }

    /// List every instance of `tenant`.
    ///
    /// Status for each listed workload comes from a fresh per-item read; a
    /// workload deleted between the list and that read reports
    /// [`InstanceStatus::Error`]. A tenant without a namespace has no
    /// instances.
    pub async fn list_instances(&self, tenant: &TenantId) -> Result<Vec<Instance>> {
        let namespace = tenant.namespace();
        let listed = match self
            .cluster
            .list_workloads(&namespace, &tenant_selector(tenant))
            .await
        {
            Ok(listed) => listed,
            Err(err) if err.is_not_found() => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut instances = Vec::with_capacity(listed.len());
        for observation in listed {
            let Some(instance_id) = observation.instance_id() else {
                warn!(
                    namespace = %namespace,
                    name = %observation.name,
                    "Skipping workload without instance identity"
                );
                continue;
            };

            let status = self.read_status(&namespace, &observation.name).await?;
            let created_at = observation.created_at.unwrap_or_else(Utc::now);
            instances.push(Instance::new(
                instance_id,
                tenant.clone(),
                status,
                created_at,
            ));
        }

        debug!(tenant = %tenant, count = instances.len(), "Listed instances");
        Ok(instances)
    }

    /// Delete the workload backing `instance`. Absence counts as success.
    pub async fn delete_instance(&self, tenant: &TenantId, instance: &InstanceId) -> Result<()> {
        let namespace = tenant.namespace();
        let name = instance.resource_name();

        match self.cluster.delete_workload(&namespace, &name).await {
            Ok(()) => {
                info!(tenant = %tenant, instance = %instance, "Instance deleted");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                debug!(tenant = %tenant, instance = %instance, "Instance not found");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn read_status(&self, namespace: &str, name: &str) -> Result<InstanceStatus> {
        match self.cluster.read_workload(namespace, name).await {
            Ok(observation) => Ok(derive_status(Some(observation.replicas))),
            Err(err) if err.is_not_found() => Ok(derive_status(None)),
            Err(err) => Err(err.into()),
        }
    }
}

fn project(tenant: &TenantId, instance: InstanceId, observation: &WorkloadObservation) -> Instance {
    Instance::new(
        instance,
        tenant.clone(),
        derive_status(Some(observation.replicas)),
        observation.created_at.unwrap_or_else(Utc::now),
    )
}
