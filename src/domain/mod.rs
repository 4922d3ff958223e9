//! Control-plane agnostic domain model.
//!
//! - [`id`] - tenant and instance identifiers and their derived names
//! - [`tenant`] - tenant records and activation state
//! - [`instance`] - instance projection and the status deriver
//! - [`workload`] - workload specs, labels and observations

pub mod error;
pub mod id;
pub mod instance;
pub mod tenant;
pub mod workload;

pub use id::{InstanceId, TenantId};
pub use instance::{derive_status, Instance, InstanceStatus};
pub use tenant::{Tenant, TenantStatus};
pub use workload::{
    Labels, ReplicaCounts, ResourceKind, WorkloadObservation, WorkloadSpec, WorkloadTemplate,
};
