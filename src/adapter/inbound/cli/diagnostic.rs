//! Miette-based error diagnostics for CLI error presentation.
//!
//! Maps crate errors onto diagnostics with a stable code and, where the
//! fix is obvious, a help line.

use std::fmt::Display;

use miette::Diagnostic;
use thiserror::Error;

use crate::error::{ClusterError, Error};

/// A failed command, ready for rendering by miette.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandError {
    /// Human-readable error message.
    pub message: String,

    /// Stable diagnostic code.
    pub code: &'static str,

    /// Optional help text with suggestions for fixing the error.
    pub help: Option<String>,
}

impl CommandError {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl Diagnostic for CommandError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

impl From<Error> for CommandError {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match &err {
            Error::Config(_) => Self::new("tenant_spinner::config", message)
                .with_help("run `tenant-spinner config validate` to check the file"),
            Error::Domain(_) => Self::new("tenant_spinner::input", message).with_help(
                "identifiers use lowercase letters, digits and '-', starting and ending with a letter or digit",
            ),
            Error::TenantNotFound { .. } => Self::new("tenant_spinner::tenant_not_found", message)
                .with_help("create the tenant first with `tenant-spinner tenant create`"),
            Error::TenantNotActive { .. } => {
                Self::new("tenant_spinner::tenant_not_active", message)
            }
            Error::InstanceNotFound { .. } => {
                Self::new("tenant_spinner::instance_not_found", message)
            }
            Error::Cluster(ClusterError::Unavailable(_)) => {
                Self::new("tenant_spinner::cluster", message).with_help(
                    "check your kubeconfig, or set `[cluster] backend = \"simulated\"`",
                )
            }
            Error::Cluster(_) => Self::new("tenant_spinner::cluster", message),
            Error::Json(_) | Error::Io(_) => Self::new("tenant_spinner::io", message),
        }
    }
}
