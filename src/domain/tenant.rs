//! Tenant records and activation state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::id::TenantId;

/// Activation state of a tenant.
///
/// Only [`TenantStatus::Active`] tenants may spawn new instances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl TenantStatus {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An isolated customer unit mapped 1:1 onto a cluster namespace.
///
/// The namespace is derived from the identifier on demand and never stored,
/// so it cannot diverge from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    id: TenantId,
    name: String,
    created_at: DateTime<Utc>,
    status: TenantStatus,
}

impl Tenant {
    /// Create an active tenant stamped with the current time.
    pub fn new(id: TenantId, name: impl Into<String>) -> Self {
        Self::with_created_at(id, name, Utc::now())
    }

    /// Create an active tenant with an explicit creation time.
    pub fn with_created_at(
        id: TenantId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
            status: TenantStatus::Active,
        }
    }

    #[must_use]
    pub fn id(&self) -> &TenantId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace owned by this tenant.
    #[must_use]
    pub fn namespace(&self) -> String {
        self.id.namespace()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn status(&self) -> TenantStatus {
        self.status
    }

    /// True if the tenant may spawn instances.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }

    /// Return a copy carrying a different activation state.
    #[must_use]
    pub fn with_status(mut self, status: TenantStatus) -> Self {
        self.status = status;
        self
    }
}

impl Serialize for Tenant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Tenant", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("namespace", &self.namespace())?;
        state.serialize_field("created_at", &self.created_at)?;
        state.serialize_field("status", &self.status)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_follows_identifier() {
        let tenant = Tenant::new(TenantId::new("acme"), "Acme Corporation");
        assert_eq!(tenant.namespace(), "tenant-acme");
        assert!(tenant.is_active());
    }

    #[test]
    fn with_status_keeps_identity() {
        let tenant = Tenant::new(TenantId::new("acme"), "Acme");
        let suspended = tenant.clone().with_status(TenantStatus::Suspended);

        assert_eq!(suspended.id(), tenant.id());
        assert_eq!(suspended.created_at(), tenant.created_at());
        assert!(!suspended.is_active());
    }

    #[test]
    fn serializes_derived_namespace() {
        let tenant = Tenant::new(TenantId::new("acme"), "Acme");
        let value = serde_json::to_value(&tenant).unwrap();

        assert_eq!(value["id"], "acme");
        assert_eq!(value["namespace"], "tenant-acme");
        assert_eq!(value["status"], "active");
    }
}
