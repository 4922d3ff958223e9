//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; every section has
//! defaults, so an empty file (or none at all) is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use tenant_spinner::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::cluster::ClusterConfig;
use super::logging::LoggingConfig;
use crate::domain::WorkloadTemplate;
use crate::error::{ConfigError, Result};

/// Environment variable that replaces `workload.image`.
pub const IMAGE_ENV: &str = "TENANT_SPINNER_IMAGE";

const PULL_POLICIES: [&str; 3] = ["Always", "IfNotPresent", "Never"];
const SERVICE_TYPES: [&str; 3] = ["ClusterIP", "NodePort", "LoadBalancer"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Control-plane backend selection.
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// Deployment and service settings shared by every instance.
    #[serde(default)]
    pub workload: WorkloadTemplate,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration from `path`, falling back to defaults if the file
    /// does not exist.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Replace values from the environment.
    ///
    /// `lookup` resolves a variable name; tests pass their own.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(image) = lookup(IMAGE_ENV).filter(|image| !image.trim().is_empty()) {
            self.workload.image = image;
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }

        let workload = &self.workload;
        if workload.container_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "workload.container_name",
            }
            .into());
        }
        if workload.image.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "workload.image",
            }
            .into());
        }
        if !PULL_POLICIES.contains(&workload.image_pull_policy.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "workload.image_pull_policy",
                reason: format!("must be one of {}", PULL_POLICIES.join(", ")),
            }
            .into());
        }
        if workload.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "workload.port",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !SERVICE_TYPES.contains(&workload.service_type.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "workload.service_type",
                reason: format!("must be one of {}", SERVICE_TYPES.join(", ")),
            }
            .into());
        }

        let quantities = [
            ("workload.requests.cpu", &workload.requests.cpu),
            ("workload.requests.memory", &workload.requests.memory),
            ("workload.limits.cpu", &workload.limits.cpu),
            ("workload.limits.memory", &workload.limits.memory),
        ];
        for (field, value) in quantities {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::cluster::ClusterBackend;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        config.validate().unwrap();

        assert_eq!(config.cluster.backend, ClusterBackend::Kubernetes);
        assert_eq!(config.workload, WorkloadTemplate::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn example_file_matches_defaults() {
        let config: Config = toml::from_str(include_str!("../../../config.toml.example")).unwrap();
        config.validate().unwrap();

        assert_eq!(config.workload, WorkloadTemplate::default());
        assert_eq!(config.cluster.backend, ClusterBackend::Kubernetes);
        assert!(!config.cluster.simulated.ready_on_create);
    }

    #[test]
    fn sections_override_defaults() {
        let config: Config = toml::from_str(
            r#"
[cluster]
backend = "simulated"

[cluster.simulated]
ready_on_create = true

[workload]
image = "registry.local/tenant-app:1.2"
port = 8080

[workload.limits]
cpu = "500m"
memory = "256Mi"
"#,
        )
        .unwrap();
        config.validate().unwrap();

        assert_eq!(config.cluster.backend, ClusterBackend::Simulated);
        assert!(config.cluster.simulated.ready_on_create);
        assert_eq!(config.workload.image, "registry.local/tenant-app:1.2");
        assert_eq!(config.workload.port, 8080);
        assert_eq!(config.workload.limits.cpu, "500m");
        assert_eq!(config.workload.requests.memory, "64Mi");
        assert_eq!(config.workload.container_name, "app-container");
    }

    #[test]
    fn image_override_replaces_configured_image() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == IMAGE_ENV).then(|| "custom:dev".to_string()));
        assert_eq!(config.workload.image, "custom:dev");

        let mut config = Config::default();
        config.apply_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.workload.image, "tenant-app:latest");
    }

    #[test]
    fn rejects_unknown_pull_policy() {
        let mut config = Config::default();
        config.workload.image_pull_policy = "Sometimes".into();

        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "workload.image_pull_policy",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_zero_port_and_empty_quantities() {
        let mut config = Config::default();
        config.workload.port = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "workload.port",
                ..
            }))
        ));

        let mut config = Config::default();
        config.workload.requests.memory = String::new();
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::MissingField {
                field: "workload.requests.memory"
            }))
        ));
    }

    #[test]
    fn rejects_unknown_backend() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[cluster]\nbackend = \"nomad\"\n");
        assert!(result.is_err());
    }
}
