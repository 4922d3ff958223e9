//! Translation between workload specs and Kubernetes objects.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, Namespace, PodSpec, PodTemplateSpec, ResourceRequirements,
    Service, ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::domain::workload::{Labels, ReplicaCounts, ResourceQuantities, WorkloadObservation};
use crate::domain::WorkloadSpec;

/// Namespace object with the given labels.
pub fn namespace(name: &str, labels: &Labels) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(labels.clone()),
            ..ObjectMeta::default()
        },
        ..Namespace::default()
    }
}

fn metadata(namespace: &str, spec: &WorkloadSpec) -> ObjectMeta {
    ObjectMeta {
        name: Some(spec.name.clone()),
        namespace: Some(namespace.to_string()),
        labels: Some(spec.labels.clone()),
        ..ObjectMeta::default()
    }
}

fn quantities(q: &ResourceQuantities) -> BTreeMap<String, Quantity> {
    BTreeMap::from([
        ("memory".to_string(), Quantity(q.memory.clone())),
        ("cpu".to_string(), Quantity(q.cpu.clone())),
    ])
}

/// Deployment running the instance container.
pub fn deployment(namespace: &str, spec: &WorkloadSpec) -> Deployment {
    let container = &spec.container;
    let env = container
        .env
        .iter()
        .map(|var| EnvVar {
            name: var.name.clone(),
            value: Some(var.value.clone()),
            ..EnvVar::default()
        })
        .collect();

    Deployment {
        metadata: metadata(namespace, spec),
        spec: Some(DeploymentSpec {
            replicas: Some(spec.replicas),
            selector: LabelSelector {
                match_labels: Some(spec.labels.clone()),
                ..LabelSelector::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(spec.labels.clone()),
                    ..ObjectMeta::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: container.name.clone(),
                        image: Some(container.image.clone()),
                        image_pull_policy: Some(container.image_pull_policy.clone()),
                        ports: Some(vec![ContainerPort {
                            container_port: i32::from(container.port),
                            ..ContainerPort::default()
                        }]),
                        env: Some(env),
                        resources: Some(ResourceRequirements {
                            requests: Some(quantities(&container.requests)),
                            limits: Some(quantities(&container.limits)),
                            ..ResourceRequirements::default()
                        }),
                        ..Container::default()
                    }],
                    ..PodSpec::default()
                }),
            },
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    }
}

/// Service selecting the instance pods.
pub fn service(namespace: &str, spec: &WorkloadSpec) -> Service {
    Service {
        metadata: metadata(namespace, spec),
        spec: Some(ServiceSpec {
            selector: Some(spec.labels.clone()),
            ports: Some(vec![ServicePort {
                protocol: Some(spec.service.protocol.clone()),
                port: i32::from(spec.service.port),
                target_port: Some(IntOrString::Int(i32::from(spec.service.target_port))),
                ..ServicePort::default()
            }]),
            type_: Some(spec.service.service_type.clone()),
            ..ServiceSpec::default()
        }),
        ..Service::default()
    }
}

/// Read replica counts and metadata back from a deployment.
///
/// Missing counts read as zero.
pub fn observe(deployment: &Deployment) -> WorkloadObservation {
    let metadata = &deployment.metadata;
    let declared = deployment
        .spec
        .as_ref()
        .and_then(|spec| spec.replicas)
        .unwrap_or(0);
    let ready = deployment
        .status
        .as_ref()
        .and_then(|status| status.ready_replicas)
        .unwrap_or(0);

    WorkloadObservation {
        name: metadata.name.clone().unwrap_or_default(),
        labels: metadata.labels.clone().unwrap_or_default(),
        replicas: ReplicaCounts::new(declared, ready),
        created_at: metadata.creation_timestamp.as_ref().map(|time| time.0),
    }
}
