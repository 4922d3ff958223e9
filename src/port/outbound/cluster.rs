//! Control-plane port.
//!
//! The orchestrator's only view of the cluster. Implementations translate
//! their transport errors into [`ClusterError`] and nothing more: no retries,
//! no interpretation of what an outcome means for a tenant.

use async_trait::async_trait;

use crate::domain::workload::{Labels, WorkloadObservation, WorkloadSpec};
use crate::error::ClusterError;

/// Result type for control-plane calls.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Typed namespace and workload operations against a cluster control plane.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Create a namespace carrying `labels`.
    ///
    /// Returns [`ClusterError::AlreadyExists`] if it is already present.
    async fn create_namespace(&self, name: &str, labels: &Labels) -> ClusterResult<()>;

    /// Create the deployment and service described by `spec` in `namespace`.
    ///
    /// Returns [`ClusterError::AlreadyExists`] only when both resources were
    /// already present. A call that finds one of them missing creates it, so
    /// retrying completes a partial create.
    async fn create_workload(&self, namespace: &str, spec: &WorkloadSpec) -> ClusterResult<()>;

    /// Read the deployment named `name`.
    ///
    /// Returns [`ClusterError::NotFound`] if it does not exist.
    async fn read_workload(&self, namespace: &str, name: &str)
        -> ClusterResult<WorkloadObservation>;

    /// List deployments in `namespace` whose labels match `selector`.
    ///
    /// A namespace that does not exist yields an empty list.
    async fn list_workloads(
        &self,
        namespace: &str,
        selector: &Labels,
    ) -> ClusterResult<Vec<WorkloadObservation>>;

    /// Delete the deployment and service named `name`.
    ///
    /// Returns [`ClusterError::NotFound`] only when neither existed.
    async fn delete_workload(&self, namespace: &str, name: &str) -> ClusterResult<()>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}
