//! Persistence port for the tenant registry.

use async_trait::async_trait;

use crate::domain::{Tenant, TenantId, TenantStatus};
use crate::error::Result;

/// Storage operations for tenants.
///
/// Implementations must allow concurrent readers and serialize writers so
/// that racing registrations of one identifier never corrupt the registry.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Register `tenant` unless its identifier is already taken.
    ///
    /// Returns the record that is stored afterwards: `tenant` itself, or the
    /// one registered earlier.
    async fn insert_if_absent(&self, tenant: Tenant) -> Result<Tenant>;

    /// Get a tenant by ID.
    async fn get(&self, id: &TenantId) -> Result<Option<Tenant>>;

    /// List all tenants in registration order.
    async fn list(&self) -> Result<Vec<Tenant>>;

    /// Change a tenant's activation state. Returns `None` for unknown tenants.
    async fn update_status(&self, id: &TenantId, status: TenantStatus) -> Result<Option<Tenant>>;
}
