//! In-memory tenant registry.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Tenant, TenantId, TenantStatus};
use crate::error::Result;
use crate::port::TenantStore;

#[derive(Debug, Default)]
struct Registry {
    /// Position of each tenant in `tenants`.
    index: HashMap<TenantId, usize>,
    /// Tenants in registration order.
    tenants: Vec<Tenant>,
}

/// Process-local tenant store.
///
/// Readers share the lock; registration and status changes take it
/// exclusively, so a check-then-insert can never interleave with another.
#[derive(Debug, Default)]
pub struct MemoryTenantStore {
    registry: RwLock<Registry>,
}

impl MemoryTenantStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered tenants.
    pub fn len(&self) -> usize {
        self.registry.read().tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TenantStore for MemoryTenantStore {
    async fn insert_if_absent(&self, tenant: Tenant) -> Result<Tenant> {
        let mut registry = self.registry.write();
        if let Some(&position) = registry.index.get(tenant.id()) {
            return Ok(registry.tenants[position].clone());
        }

        let position = registry.tenants.len();
        registry.index.insert(tenant.id().clone(), position);
        registry.tenants.push(tenant.clone());
        Ok(tenant)
    }

    async fn get(&self, id: &TenantId) -> Result<Option<Tenant>> {
        let registry = self.registry.read();
        Ok(registry
            .index
            .get(id)
            .map(|&position| registry.tenants[position].clone()))
    }

    async fn list(&self) -> Result<Vec<Tenant>> {
        Ok(self.registry.read().tenants.clone())
    }

    async fn update_status(&self, id: &TenantId, status: TenantStatus) -> Result<Option<Tenant>> {
        let mut registry = self.registry.write();
        let Some(&position) = registry.index.get(id) else {
            return Ok(None);
        };

        let updated = registry.tenants[position].clone().with_status(status);
        registry.tenants[position] = updated.clone();
        Ok(Some(updated))
    }
}
