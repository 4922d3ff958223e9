//! Tenant and instance use cases exposed to front doors.

use async_trait::async_trait;

use crate::domain::{Instance, InstanceId, Tenant, TenantId, TenantStatus};
use crate::error::Result;

/// Request/response contract between a front door and the orchestrator.
///
/// | Operation | Failure |
/// |---|---|
/// | `create_tenant` | cluster error |
/// | `get_tenant` | `TenantNotFound` |
/// | `create_instance` | `TenantNotFound`, `TenantNotActive`, cluster error |
/// | `get_instance` | `InstanceNotFound` |
/// | `delete_instance` | cluster error only; absence is success |
#[async_trait]
pub trait TenantOperations: Send + Sync {
    async fn create_tenant(&self, id: &TenantId, name: &str) -> Result<Tenant>;

    async fn get_tenant(&self, id: &TenantId) -> Result<Tenant>;

    async fn list_tenants(&self) -> Result<Vec<Tenant>>;

    async fn set_tenant_status(&self, id: &TenantId, status: TenantStatus) -> Result<Tenant>;

    async fn create_instance(&self, tenant: &TenantId, instance: &InstanceId) -> Result<Instance>;

    async fn get_instance(&self, tenant: &TenantId, instance: &InstanceId) -> Result<Instance>;

    async fn list_instances(&self, tenant: &TenantId) -> Result<Vec<Instance>>;

    async fn delete_instance(&self, tenant: &TenantId, instance: &InstanceId) -> Result<()>;
}
