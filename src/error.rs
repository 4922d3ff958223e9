use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::id::{InstanceId, TenantId};
use crate::domain::tenant::TenantStatus;
use crate::domain::workload::ResourceKind;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Closed set of outcomes a control-plane call can fail with.
///
/// Adapters translate their transport errors into these variants so callers
/// never inspect status codes or reason strings themselves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    #[error("{kind} {name} already exists")]
    AlreadyExists { kind: ResourceKind, name: String },

    #[error("{kind} {name} not found")]
    NotFound { kind: ResourceKind, name: String },

    #[error("control plane rejected request ({code} {reason}): {message}")]
    Api {
        code: u16,
        reason: String,
        message: String,
    },

    #[error("control plane transport error: {0}")]
    Transport(String),

    #[error("control plane unavailable: {0}")]
    Unavailable(String),
}

impl ClusterError {
    /// True for the `AlreadyExists` outcome.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// True for the `NotFound` outcome.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error("tenant not found: {tenant_id}")]
    TenantNotFound { tenant_id: TenantId },

    #[error("tenant is not active: {tenant_id} ({status})")]
    TenantNotActive {
        tenant_id: TenantId,
        status: TenantStatus,
    },

    #[error("instance not found: {instance_id} (tenant {tenant_id})")]
    InstanceNotFound {
        tenant_id: TenantId,
        instance_id: InstanceId,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the error means "the requested thing does not exist".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TenantNotFound { .. } | Self::InstanceNotFound { .. }
        ) || matches!(self, Self::Cluster(err) if err.is_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_error_kinds_are_discriminated_without_strings() {
        let exists = ClusterError::AlreadyExists {
            kind: ResourceKind::Namespace,
            name: "tenant-acme".into(),
        };
        let missing = ClusterError::NotFound {
            kind: ResourceKind::Deployment,
            name: "instance-a".into(),
        };

        assert!(exists.is_already_exists());
        assert!(!exists.is_not_found());
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "Deployment instance-a not found");
    }

    #[test]
    fn not_found_covers_tenant_instance_and_cluster() {
        let tenant = Error::TenantNotFound {
            tenant_id: TenantId::new("acme"),
        };
        let cluster = Error::from(ClusterError::NotFound {
            kind: ResourceKind::Service,
            name: "instance-a".into(),
        });
        let transport = Error::from(ClusterError::Transport("reset".into()));

        assert!(tenant.is_not_found());
        assert!(cluster.is_not_found());
        assert!(!transport.is_not_found());
    }
}
