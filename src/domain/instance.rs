//! Instance projection and the status deriver.
//!
//! Instances are never stored. Each read rebuilds them from what the control
//! plane reports, and [`derive_status`] turns replica counts into a coarse
//! lifecycle state. Nothing reconciles in the background, so two sequential
//! reads can see different states while a rollout is in flight.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::id::{InstanceId, TenantId};
use super::workload::ReplicaCounts;

/// Coarse lifecycle state of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Creating,
    Running,
    Stopped,
    Error,
}

impl InstanceStatus {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creating => "creating",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map an observed deployment to a lifecycle state.
///
/// Rules, first match wins:
/// 1. no observation: `Error`
/// 2. every declared replica ready and at least one declared: `Running`
/// 3. some replica ready: `Creating`
/// 4. otherwise: `Stopped`
///
/// A zero-replica deployment reports `Stopped`, never `Running`.
#[must_use]
pub fn derive_status(observation: Option<ReplicaCounts>) -> InstanceStatus {
    let Some(counts) = observation else {
        return InstanceStatus::Error;
    };

    if counts.ready == counts.declared && counts.declared > 0 {
        InstanceStatus::Running
    } else if counts.ready > 0 {
        InstanceStatus::Creating
    } else {
        InstanceStatus::Stopped
    }
}

/// A tenant-owned workload as currently seen by the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    id: InstanceId,
    tenant_id: TenantId,
    status: InstanceStatus,
    created_at: DateTime<Utc>,
}

impl Instance {
    pub fn new(
        id: InstanceId,
        tenant_id: TenantId,
        status: InstanceStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            status,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &InstanceId {
        &self.id
    }

    #[must_use]
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    /// Resource name of the backing deployment and service.
    #[must_use]
    pub fn name(&self) -> String {
        self.id.resource_name()
    }

    /// Namespace of the owning tenant.
    #[must_use]
    pub fn namespace(&self) -> String {
        self.tenant_id.namespace()
    }

    #[must_use]
    pub fn status(&self) -> InstanceStatus {
        self.status
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Instance", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("tenant_id", &self.tenant_id)?;
        state.serialize_field("name", &self.name())?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("created_at", &self.created_at)?;
        state.serialize_field("namespace", &self.namespace())?;
        state.end()
    }
}
