//! Domain identifier types with proper encapsulation.
//!
//! Identifiers are caller-supplied and used verbatim in control-plane names.
//! [`TenantId::new`] and [`InstanceId::new`] accept any string; front doors
//! that take untrusted input should go through `parse`, which enforces the
//! DNS label rules the derived names must satisfy.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Prefix of every tenant namespace.
pub const NAMESPACE_PREFIX: &str = "tenant-";

/// Prefix of every instance deployment and service.
pub const RESOURCE_PREFIX: &str = "instance-";

/// Upper bound on a DNS-1123 label, which namespaces and service names must be.
const DNS_LABEL_MAX: usize = 63;

/// Tenant identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    /// Create a new `TenantId` from a string, unchecked.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a `TenantId` whose derived namespace is a valid DNS label.
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        validate_label(&id, NAMESPACE_PREFIX)?;
        Ok(Self(id))
    }

    /// Get the tenant ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace owned by this tenant: `tenant-<id>`.
    #[must_use]
    pub fn namespace(&self) -> String {
        format!("{NAMESPACE_PREFIX}{}", self.0)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Instance identifier, unique within its tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(String);

impl InstanceId {
    /// Create a new `InstanceId` from a string, unchecked.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create an `InstanceId` whose derived resource name is a valid DNS label.
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        validate_label(&id, RESOURCE_PREFIX)?;
        Ok(Self(id))
    }

    /// Recover the identifier from a resource name produced by [`resource_name`].
    ///
    /// [`resource_name`]: InstanceId::resource_name
    #[must_use]
    pub fn from_resource_name(name: &str) -> Option<Self> {
        name.strip_prefix(RESOURCE_PREFIX)
            .filter(|id| !id.is_empty())
            .map(Self::new)
    }

    /// Get the instance ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the deployment and service backing this instance: `instance-<id>`.
    #[must_use]
    pub fn resource_name(&self) -> String {
        format!("{RESOURCE_PREFIX}{}", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstanceId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for InstanceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

fn validate_label(id: &str, prefix: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidIdentifier {
        value: id.to_string(),
        reason: reason.to_string(),
    };

    if id.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if prefix.len() + id.len() > DNS_LABEL_MAX {
        return Err(invalid(&format!(
            "must be at most {} characters",
            DNS_LABEL_MAX - prefix.len()
        )));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid(
            "may only contain lowercase letters, digits and '-'",
        ));
    }
    if id.starts_with('-') {
        return Err(invalid("must start with a letter or digit"));
    }
    if id.ends_with('-') {
        return Err(invalid("must end with a letter or digit"));
    }
    Ok(())
}
