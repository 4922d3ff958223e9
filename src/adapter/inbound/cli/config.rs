//! Handlers for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::cluster::ClusterBackend;
use crate::infrastructure::config::settings::{Config, IMAGE_ENV};

/// Execute `config show`.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": serde_json::to_value(config)?,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, defaults applied)");
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Cluster");
    output::field("Backend", config.cluster.backend.as_str());
    if config.cluster.backend == ClusterBackend::Simulated {
        output::field(
            "Ready early",
            if config.cluster.simulated.ready_on_create {
                "yes"
            } else {
                "no"
            },
        );
    }

    let workload = &config.workload;
    output::section("Workload");
    output::field("Container", &workload.container_name);
    output::field("Image", &workload.image);
    output::field("Pull policy", &workload.image_pull_policy);
    output::field("Port", workload.port);
    output::field("Service", &workload.service_type);
    output::field(
        "Requests",
        format!("cpu {} / memory {}", workload.requests.cpu, workload.requests.memory),
    );
    output::field(
        "Limits",
        format!("cpu {} / memory {}", workload.limits.cpu, workload.limits.memory),
    );
    if std::env::var_os(IMAGE_ENV).is_some() {
        output::note(&format!("image overridden by {IMAGE_ENV}"));
    }

    Ok(())
}

/// Execute `config validate`.
///
/// Unlike the other commands, a missing file is an error here.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
            "backend": config.cluster.backend.as_str(),
        }));
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");
    output::field(
        "Next",
        format!("tenant-spinner config show -c {}", path.display()),
    );
    Ok(())
}
