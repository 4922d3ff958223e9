//! Workload model: what the orchestrator asks the control plane for, and what
//! it reads back.
//!
//! A workload is the (Deployment, Service) pair backing one instance. Both
//! resources share the name `instance-<id>` and the label set produced by
//! [`workload_labels`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{InstanceId, TenantId};

/// Label map attached to control-plane resources.
pub type Labels = BTreeMap<String, String>;

pub const LABEL_APP: &str = "app";
pub const LABEL_TENANT: &str = "tenant";
pub const LABEL_INSTANCE: &str = "instance";

/// Value of the `app` label on every instance resource.
pub const APP_INSTANCE: &str = "instance";

/// Replica count for every instance. Scaling is not supported.
pub const INSTANCE_REPLICAS: i32 = 1;

/// Kinds of control-plane resources the orchestrator manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Namespace,
    Deployment,
    Service,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Namespace => "Namespace",
            Self::Deployment => "Deployment",
            Self::Service => "Service",
        };
        f.write_str(name)
    }
}

/// Labels for a tenant namespace: `{tenant: <id>}`.
#[must_use]
pub fn namespace_labels(tenant: &TenantId) -> Labels {
    Labels::from([(LABEL_TENANT.to_string(), tenant.to_string())])
}

/// Labels for an instance's deployment, pod template and service.
#[must_use]
pub fn workload_labels(tenant: &TenantId, instance: &InstanceId) -> Labels {
    let mut labels = tenant_selector(tenant);
    labels.insert(LABEL_INSTANCE.to_string(), instance.to_string());
    labels
}

/// Selector matching every instance workload of a tenant.
#[must_use]
pub fn tenant_selector(tenant: &TenantId) -> Labels {
    Labels::from([
        (LABEL_APP.to_string(), APP_INSTANCE.to_string()),
        (LABEL_TENANT.to_string(), tenant.to_string()),
    ])
}

/// Equality-based selector match: every selector pair must be present.
#[must_use]
pub fn matches_selector(labels: &Labels, selector: &Labels) -> bool {
    selector
        .iter()
        .all(|(key, value)| labels.get(key) == Some(value))
}

/// Render a selector in `key=value,key=value` form.
#[must_use]
pub fn selector_expression(selector: &Labels) -> String {
    selector
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// CPU and memory quantities in control-plane notation (`100m`, `64Mi`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceQuantities {
    pub cpu: String,
    pub memory: String,
}

impl ResourceQuantities {
    pub fn new(cpu: impl Into<String>, memory: impl Into<String>) -> Self {
        Self {
            cpu: cpu.into(),
            memory: memory.into(),
        }
    }
}

/// Deployment-wide settings shared by every instance.
///
/// Loaded from the `[workload]` configuration section; the defaults describe
/// the stock tenant application image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkloadTemplate {
    /// Container name inside the pod.
    pub container_name: String,
    /// Container image reference.
    pub image: String,
    /// One of `Always`, `IfNotPresent`, `Never`.
    pub image_pull_policy: String,
    /// Port the application listens on; also the service port.
    pub port: u16,
    /// Service type: `ClusterIP`, `NodePort` or `LoadBalancer`.
    pub service_type: String,
    /// Resource requests.
    pub requests: ResourceQuantities,
    /// Resource limits.
    pub limits: ResourceQuantities,
}

impl Default for WorkloadTemplate {
    fn default() -> Self {
        Self {
            container_name: "app-container".into(),
            image: "tenant-app:latest".into(),
            image_pull_policy: "Never".into(),
            port: 9090,
            service_type: "ClusterIP".into(),
            requests: ResourceQuantities::new("100m", "64Mi"),
            limits: ResourceQuantities::new("200m", "128Mi"),
        }
    }
}

/// A single environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The single application container of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub image_pull_policy: String,
    pub port: u16,
    pub env: Vec<EnvVar>,
    pub requests: ResourceQuantities,
    pub limits: ResourceQuantities,
}

/// The service exposing an instance inside the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    pub port: u16,
    pub target_port: u16,
    pub protocol: String,
    pub service_type: String,
}

/// Full description of one instance's deployment and service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSpec {
    pub namespace: String,
    pub name: String,
    pub labels: Labels,
    pub replicas: i32,
    pub container: ContainerSpec,
    pub service: ServiceSpec,
}

impl WorkloadSpec {
    /// Build the workload for `instance` of `tenant` from the shared template.
    ///
    /// The container receives `TENANT_ID`, `INSTANCE_ID` and `PORT` so the
    /// application knows whose workload it is.
    #[must_use]
    pub fn for_instance(
        template: &WorkloadTemplate,
        tenant: &TenantId,
        instance: &InstanceId,
    ) -> Self {
        let env = vec![
            EnvVar::new("TENANT_ID", tenant.as_str()),
            EnvVar::new("INSTANCE_ID", instance.as_str()),
            EnvVar::new("PORT", template.port.to_string()),
        ];

        Self {
            namespace: tenant.namespace(),
            name: instance.resource_name(),
            labels: workload_labels(tenant, instance),
            replicas: INSTANCE_REPLICAS,
            container: ContainerSpec {
                name: template.container_name.clone(),
                image: template.image.clone(),
                image_pull_policy: template.image_pull_policy.clone(),
                port: template.port,
                env,
                requests: template.requests.clone(),
                limits: template.limits.clone(),
            },
            service: ServiceSpec {
                port: template.port,
                target_port: template.port,
                protocol: "TCP".into(),
                service_type: template.service_type.clone(),
            },
        }
    }
}

/// Declared vs. ready replicas of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplicaCounts {
    pub declared: i32,
    pub ready: i32,
}

impl ReplicaCounts {
    #[must_use]
    pub const fn new(declared: i32, ready: i32) -> Self {
        Self { declared, ready }
    }
}

/// What the control plane reports about one workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadObservation {
    /// Resource name (`instance-<id>`).
    pub name: String,
    /// Labels on the deployment.
    pub labels: Labels,
    pub replicas: ReplicaCounts,
    /// Creation time from resource metadata, when the control plane reports one.
    pub created_at: Option<DateTime<Utc>>,
}

impl WorkloadObservation {
    /// Instance this workload belongs to.
    ///
    /// Prefers the `instance` label and falls back to the resource name.
    #[must_use]
    pub fn instance_id(&self) -> Option<InstanceId> {
        self.labels
            .get(LABEL_INSTANCE)
            .filter(|id| !id.is_empty())
            .map(|id| InstanceId::new(id.as_str()))
            .or_else(|| InstanceId::from_resource_name(&self.name))
    }
}
