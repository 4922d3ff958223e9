//! Kubernetes control-plane binding.
//!
//! Connects with ambient configuration (kubeconfig or in-cluster service
//! account) and maps API status codes onto [`ClusterError`]: 409 is
//! `AlreadyExists`, 404 is `NotFound`, any other API status is `Api`, and
//! everything else is `Transport`.

pub mod manifest;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Service};
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use kube::Client;
use tracing::{debug, info};

use crate::domain::workload::{selector_expression, Labels, WorkloadObservation};
use crate::domain::{ResourceKind, WorkloadSpec};
use crate::error::ClusterError;
use crate::port::{ClusterClient, ClusterResult};

/// Translate a kube error into the closed outcome set.
fn classify(err: kube::Error, kind: ResourceKind, name: &str) -> ClusterError {
    match err {
        kube::Error::Api(response) => match response.code {
            409 => ClusterError::AlreadyExists {
                kind,
                name: name.to_string(),
            },
            404 => ClusterError::NotFound {
                kind,
                name: name.to_string(),
            },
            code => ClusterError::Api {
                code,
                reason: response.reason,
                message: response.message,
            },
        },
        other => ClusterError::Transport(other.to_string()),
    }
}

/// Outcome of a create that tolerates an existing resource.
enum Created {
    New,
    Existing,
}

/// [`ClusterClient`] backed by a Kubernetes API server.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    /// Wrap an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the ambient kubeconfig or in-cluster environment.
    pub async fn connect() -> ClusterResult<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| ClusterError::Unavailable(e.to_string()))?;
        Ok(Self::new(client))
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn services(&self, namespace: &str) -> Api<Service> {
        Api::namespaced(self.client.clone(), namespace)
    }

    async fn create_deployment(
        &self,
        namespace: &str,
        spec: &WorkloadSpec,
    ) -> ClusterResult<Created> {
        let object = manifest::deployment(namespace, spec);
        match self
            .deployments(namespace)
            .create(&PostParams::default(), &object)
            .await
        {
            Ok(_) => {
                info!(namespace = %namespace, name = %spec.name, "Deployment created");
                Ok(Created::New)
            }
            Err(err) => match classify(err, ResourceKind::Deployment, &spec.name) {
                ClusterError::AlreadyExists { .. } => {
                    debug!(namespace = %namespace, name = %spec.name, "Deployment already exists");
                    Ok(Created::Existing)
                }
                other => Err(other),
            },
        }
    }

    async fn create_service(&self, namespace: &str, spec: &WorkloadSpec) -> ClusterResult<Created> {
        let object = manifest::service(namespace, spec);
        match self
            .services(namespace)
            .create(&PostParams::default(), &object)
            .await
        {
            Ok(_) => {
                info!(namespace = %namespace, name = %spec.name, "Service created");
                Ok(Created::New)
            }
            Err(err) => match classify(err, ResourceKind::Service, &spec.name) {
                ClusterError::AlreadyExists { .. } => {
                    debug!(namespace = %namespace, name = %spec.name, "Service already exists");
                    Ok(Created::Existing)
                }
                other => Err(other),
            },
        }
    }
}

#[async_trait]
impl ClusterClient for KubeCluster {
    async fn create_namespace(&self, name: &str, labels: &Labels) -> ClusterResult<()> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        api.create(&PostParams::default(), &manifest::namespace(name, labels))
            .await
            .map_err(|e| classify(e, ResourceKind::Namespace, name))?;
        info!(namespace = %name, "Namespace created");
        Ok(())
    }

    async fn create_workload(&self, namespace: &str, spec: &WorkloadSpec) -> ClusterResult<()> {
        // Deployment first, then service. An existing deployment does not
        // stop the service from being created, so a retry heals a partial create.
        let deployment = self.create_deployment(namespace, spec).await?;
        let service = self.create_service(namespace, spec).await?;

        match (deployment, service) {
            (Created::Existing, Created::Existing) => Err(ClusterError::AlreadyExists {
                kind: ResourceKind::Deployment,
                name: spec.name.clone(),
            }),
            _ => Ok(()),
        }
    }

    async fn read_workload(
        &self,
        namespace: &str,
        name: &str,
    ) -> ClusterResult<WorkloadObservation> {
        let deployment = self
            .deployments(namespace)
            .get(name)
            .await
            .map_err(|e| classify(e, ResourceKind::Deployment, name))?;
        Ok(manifest::observe(&deployment))
    }

    async fn list_workloads(
        &self,
        namespace: &str,
        selector: &Labels,
    ) -> ClusterResult<Vec<WorkloadObservation>> {
        let params = ListParams::default().labels(&selector_expression(selector));
        match self.deployments(namespace).list(&params).await {
            Ok(list) => Ok(list.items.iter().map(manifest::observe).collect()),
            Err(err) => match classify(err, ResourceKind::Namespace, namespace) {
                ClusterError::NotFound { .. } => Ok(Vec::new()),
                other => Err(other),
            },
        }
    }

    async fn delete_workload(&self, namespace: &str, name: &str) -> ClusterResult<()> {
        let params = DeleteParams::default();

        // Both deletions are attempted even if the first finds nothing.
        let deployment = match self.deployments(namespace).delete(name, &params).await {
            Ok(_) => {
                info!(namespace = %namespace, name = %name, "Deployment deleted");
                true
            }
            Err(err) => match classify(err, ResourceKind::Deployment, name) {
                ClusterError::NotFound { .. } => false,
                other => return Err(other),
            },
        };
        let service = match self.services(namespace).delete(name, &params).await {
            Ok(_) => {
                info!(namespace = %namespace, name = %name, "Service deleted");
                true
            }
            Err(err) => match classify(err, ResourceKind::Service, name) {
                ClusterError::NotFound { .. } => false,
                other => return Err(other),
            },
        };

        if deployment || service {
            Ok(())
        } else {
            Err(ClusterError::NotFound {
                kind: ResourceKind::Deployment,
                name: name.to_string(),
            })
        }
    }

    fn backend_name(&self) -> &'static str {
        "kubernetes"
    }
}
