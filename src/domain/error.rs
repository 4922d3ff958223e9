//! Domain validation errors for core domain types.
//!
//! These errors are returned by the validating `parse` constructors.
//!
//! # Examples
//!
//! ```
//! use tenant_spinner::domain::error::DomainError;
//! use tenant_spinner::domain::id::TenantId;
//!
//! let result = TenantId::parse("Not_A_Label");
//! assert!(matches!(result, Err(DomainError::InvalidIdentifier { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Identifier cannot be embedded in a control-plane resource name.
    #[error("invalid identifier '{value}': {reason}")]
    InvalidIdentifier {
        /// The rejected identifier.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
