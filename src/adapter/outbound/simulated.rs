//! In-process control plane.
//!
//! Holds namespaces and workloads in concurrent maps and answers the
//! [`ClusterClient`] contract the way a real cluster would, including label
//! selection and creation timestamps. Used by the `simulated` backend for
//! offline runs and by tests, which drive rollouts through
//! [`SimulatedCluster::set_ready_replicas`] and
//! [`SimulatedCluster::set_replicas`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::workload::{matches_selector, Labels, ReplicaCounts, WorkloadObservation};
use crate::domain::{ResourceKind, WorkloadSpec};
use crate::error::ClusterError;
use crate::port::{ClusterClient, ClusterResult};

#[derive(Debug, Clone)]
struct SimulatedWorkload {
    labels: Labels,
    declared: i32,
    ready: i32,
    created_at: DateTime<Utc>,
    has_deployment: bool,
    has_service: bool,
}

impl SimulatedWorkload {
    fn observe(&self, name: &str) -> WorkloadObservation {
        WorkloadObservation {
            name: name.to_string(),
            labels: self.labels.clone(),
            replicas: ReplicaCounts::new(self.declared, self.ready),
            created_at: Some(self.created_at),
        }
    }
}

/// Simulated cluster control plane.
#[derive(Debug, Default)]
pub struct SimulatedCluster {
    namespaces: DashMap<String, Labels>,
    workloads: DashMap<(String, String), SimulatedWorkload>,
    ready_on_create: bool,
}

impl SimulatedCluster {
    /// Create an empty cluster whose workloads start with zero ready replicas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose whether new workloads report every replica ready immediately.
    #[must_use]
    pub fn with_ready_on_create(mut self, ready_on_create: bool) -> Self {
        self.ready_on_create = ready_on_create;
        self
    }

    /// Set the ready replica count of a deployment.
    ///
    /// Returns false if the deployment does not exist.
    pub fn set_ready_replicas(&self, namespace: &str, name: &str, ready: i32) -> bool {
        match self.workloads.get_mut(&key(namespace, name)) {
            Some(mut workload) if workload.has_deployment => {
                workload.ready = ready;
                true
            }
            _ => false,
        }
    }

    /// Set both the declared and ready replica counts of a deployment,
    /// as a scaled-up rollout in progress would report them.
    ///
    /// Returns false if the deployment does not exist.
    pub fn set_replicas(&self, namespace: &str, name: &str, declared: i32, ready: i32) -> bool {
        match self.workloads.get_mut(&key(namespace, name)) {
            Some(mut workload) if workload.has_deployment => {
                workload.declared = declared;
                workload.ready = ready;
                true
            }
            _ => false,
        }
    }

    /// Mark every replica of a deployment ready.
    pub fn mark_ready(&self, namespace: &str, name: &str) -> bool {
        match self.workloads.get_mut(&key(namespace, name)) {
            Some(mut workload) if workload.has_deployment => {
                workload.ready = workload.declared;
                true
            }
            _ => false,
        }
    }

    /// True if the namespace exists.
    pub fn has_namespace(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    /// Labels a namespace was created with.
    pub fn namespace_labels(&self, name: &str) -> Option<Labels> {
        self.namespaces.get(name).map(|labels| labels.clone())
    }

    /// True if the deployment exists.
    pub fn has_deployment(&self, namespace: &str, name: &str) -> bool {
        self.workloads
            .get(&key(namespace, name))
            .is_some_and(|workload| workload.has_deployment)
    }

    /// True if the service exists.
    pub fn has_service(&self, namespace: &str, name: &str) -> bool {
        self.workloads
            .get(&key(namespace, name))
            .is_some_and(|workload| workload.has_service)
    }

    /// Drop only the service of a workload, leaving a partial create behind.
    pub fn remove_service(&self, namespace: &str, name: &str) -> bool {
        let workload_key = key(namespace, name);
        let removed = match self.workloads.get_mut(&workload_key) {
            Some(mut workload) if workload.has_service => {
                workload.has_service = false;
                true
            }
            _ => false,
        };
        self.workloads
            .remove_if(&workload_key, |_, w| !w.has_deployment && !w.has_service);
        removed
    }

    /// Number of workloads (deployment or service) in a namespace.
    pub fn workload_count(&self, namespace: &str) -> usize {
        self.workloads
            .iter()
            .filter(|entry| entry.key().0 == namespace)
            .count()
    }
}

fn key(namespace: &str, name: &str) -> (String, String) {
    (namespace.to_string(), name.to_string())
}

#[async_trait]
impl ClusterClient for SimulatedCluster {
    async fn create_namespace(&self, name: &str, labels: &Labels) -> ClusterResult<()> {
        match self.namespaces.entry(name.to_string()) {
            Entry::Occupied(_) => Err(ClusterError::AlreadyExists {
                kind: ResourceKind::Namespace,
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(labels.clone());
                debug!(namespace = %name, "simulated namespace created");
                Ok(())
            }
        }
    }

    async fn create_workload(&self, namespace: &str, spec: &WorkloadSpec) -> ClusterResult<()> {
        if !self.has_namespace(namespace) {
            return Err(ClusterError::NotFound {
                kind: ResourceKind::Namespace,
                name: namespace.to_string(),
            });
        }

        match self.workloads.entry(key(namespace, &spec.name)) {
            Entry::Occupied(mut slot) => {
                let workload = slot.get_mut();
                if workload.has_deployment && workload.has_service {
                    return Err(ClusterError::AlreadyExists {
                        kind: ResourceKind::Deployment,
                        name: spec.name.clone(),
                    });
                }
                if !workload.has_deployment {
                    workload.has_deployment = true;
                    workload.declared = spec.replicas;
                    workload.ready = if self.ready_on_create { spec.replicas } else { 0 };
                }
                workload.has_service = true;
                debug!(namespace = %namespace, name = %spec.name, "simulated workload completed");
                Ok(())
            }
            Entry::Vacant(slot) => {
                slot.insert(SimulatedWorkload {
                    labels: spec.labels.clone(),
                    declared: spec.replicas,
                    ready: if self.ready_on_create { spec.replicas } else { 0 },
                    created_at: Utc::now(),
                    has_deployment: true,
                    has_service: true,
                });
                debug!(namespace = %namespace, name = %spec.name, "simulated workload created");
                Ok(())
            }
        }
    }

    async fn read_workload(
        &self,
        namespace: &str,
        name: &str,
    ) -> ClusterResult<WorkloadObservation> {
        self.workloads
            .get(&key(namespace, name))
            .filter(|workload| workload.has_deployment)
            .map(|workload| workload.observe(name))
            .ok_or_else(|| ClusterError::NotFound {
                kind: ResourceKind::Deployment,
                name: name.to_string(),
            })
    }

    async fn list_workloads(
        &self,
        namespace: &str,
        selector: &Labels,
    ) -> ClusterResult<Vec<WorkloadObservation>> {
        let mut observations: Vec<_> = self
            .workloads
            .iter()
            .filter(|entry| entry.key().0 == namespace)
            .filter(|entry| entry.has_deployment && matches_selector(&entry.labels, selector))
            .map(|entry| entry.observe(&entry.key().1))
            .collect();
        observations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(observations)
    }

    async fn delete_workload(&self, namespace: &str, name: &str) -> ClusterResult<()> {
        match self.workloads.remove(&key(namespace, name)) {
            Some(_) => {
                debug!(namespace = %namespace, name = %name, "simulated workload deleted");
                Ok(())
            }
            None => Err(ClusterError::NotFound {
                kind: ResourceKind::Deployment,
                name: name.to_string(),
            }),
        }
    }

    fn backend_name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workload::{namespace_labels, tenant_selector};
    use crate::domain::{InstanceId, TenantId, WorkloadTemplate};

    fn spec(tenant: &str, instance: &str) -> WorkloadSpec {
        WorkloadSpec::for_instance(
            &WorkloadTemplate::default(),
            &TenantId::new(tenant),
            &InstanceId::new(instance),
        )
    }

    async fn cluster_with_namespace(tenant: &str) -> SimulatedCluster {
        let cluster = SimulatedCluster::new();
        let id = TenantId::new(tenant);
        cluster
            .create_namespace(&id.namespace(), &namespace_labels(&id))
            .await
            .unwrap();
        cluster
    }

    #[tokio::test]
    async fn duplicate_namespace_reports_already_exists() {
        let cluster = cluster_with_namespace("acme").await;
        let err = cluster
            .create_namespace("tenant-acme", &Labels::new())
            .await
            .unwrap_err();

        assert!(err.is_already_exists());
        assert_eq!(cluster.namespace_labels("tenant-acme").unwrap()["tenant"], "acme");
    }

    #[tokio::test]
    async fn workload_requires_namespace() {
        let cluster = SimulatedCluster::new();
        let err = cluster
            .create_workload("tenant-acme", &spec("acme", "a"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClusterError::NotFound {
                kind: ResourceKind::Namespace,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn readiness_follows_configuration_and_hooks() {
        let cluster = cluster_with_namespace("acme").await;
        cluster
            .create_workload("tenant-acme", &spec("acme", "a"))
            .await
            .unwrap();

        let observed = cluster.read_workload("tenant-acme", "instance-a").await.unwrap();
        assert_eq!(observed.replicas, ReplicaCounts::new(1, 0));
        assert!(observed.created_at.is_some());

        assert!(cluster.mark_ready("tenant-acme", "instance-a"));
        let observed = cluster.read_workload("tenant-acme", "instance-a").await.unwrap();
        assert_eq!(observed.replicas, ReplicaCounts::new(1, 1));

        assert!(!cluster.set_ready_replicas("tenant-acme", "instance-missing", 1));
    }

    #[tokio::test]
    async fn scaled_rollout_reports_declared_and_ready() {
        let cluster = cluster_with_namespace("acme").await;
        cluster
            .create_workload("tenant-acme", &spec("acme", "a"))
            .await
            .unwrap();

        assert!(cluster.set_replicas("tenant-acme", "instance-a", 3, 1));
        let observed = cluster.read_workload("tenant-acme", "instance-a").await.unwrap();
        assert_eq!(observed.replicas, ReplicaCounts::new(3, 1));

        assert!(cluster.mark_ready("tenant-acme", "instance-a"));
        let observed = cluster.read_workload("tenant-acme", "instance-a").await.unwrap();
        assert_eq!(observed.replicas, ReplicaCounts::new(3, 3));

        assert!(!cluster.set_replicas("tenant-acme", "instance-missing", 3, 1));
    }

    #[tokio::test]
    async fn ready_on_create_reports_full_readiness() {
        let cluster = SimulatedCluster::new().with_ready_on_create(true);
        cluster
            .create_namespace("tenant-acme", &Labels::new())
            .await
            .unwrap();
        cluster
            .create_workload("tenant-acme", &spec("acme", "a"))
            .await
            .unwrap();

        let observed = cluster.read_workload("tenant-acme", "instance-a").await.unwrap();
        assert_eq!(observed.replicas, ReplicaCounts::new(1, 1));
    }

    #[tokio::test]
    async fn create_completes_partial_workload() {
        let cluster = cluster_with_namespace("acme").await;
        let workload = spec("acme", "a");
        cluster.create_workload("tenant-acme", &workload).await.unwrap();
        assert!(cluster.remove_service("tenant-acme", "instance-a"));
        assert!(!cluster.has_service("tenant-acme", "instance-a"));

        cluster.create_workload("tenant-acme", &workload).await.unwrap();
        assert!(cluster.has_service("tenant-acme", "instance-a"));

        let err = cluster
            .create_workload("tenant-acme", &workload)
            .await
            .unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn list_filters_by_selector_and_namespace() {
        let cluster = cluster_with_namespace("acme").await;
        cluster
            .create_workload("tenant-acme", &spec("acme", "b"))
            .await
            .unwrap();
        cluster
            .create_workload("tenant-acme", &spec("acme", "a"))
            .await
            .unwrap();
        // Foreign labels inside the tenant namespace are not ours.
        cluster
            .create_workload("tenant-acme", &spec("globex", "x"))
            .await
            .unwrap();

        let listed = cluster
            .list_workloads("tenant-acme", &tenant_selector(&TenantId::new("acme")))
            .await
            .unwrap();
        let names: Vec<_> = listed.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["instance-a", "instance-b"]);

        let empty = cluster
            .list_workloads("tenant-nobody", &Labels::new())
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn delete_reports_missing_workloads() {
        let cluster = cluster_with_namespace("acme").await;
        cluster
            .create_workload("tenant-acme", &spec("acme", "a"))
            .await
            .unwrap();

        cluster.delete_workload("tenant-acme", "instance-a").await.unwrap();
        assert_eq!(cluster.workload_count("tenant-acme"), 0);

        let err = cluster
            .delete_workload("tenant-acme", "instance-a")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
