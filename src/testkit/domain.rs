//! Builders for identifiers used across tests.

use crate::domain::{InstanceId, TenantId};

/// Create a [`TenantId`] from a string.
pub fn tenant(id: &str) -> TenantId {
    TenantId::new(id)
}

/// Create an [`InstanceId`] from a string.
pub fn instance(id: &str) -> InstanceId {
    InstanceId::new(id)
}

/// Generate `n` instance IDs named `instance-0` .. `instance-{n-1}`.
pub fn make_instances(n: usize) -> Vec<InstanceId> {
    (0..n).map(|i| InstanceId::new(format!("instance-{i}"))).collect()
}
