//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::cluster::ClusterBackend;
use crate::infrastructure::config::settings::Config;

/// Default configuration pointed at the simulated backend.
pub fn simulated() -> Config {
    let mut config = Config::default();
    config.cluster.backend = ClusterBackend::Simulated;
    config
}

/// Simulated backend whose workloads report ready immediately.
pub fn simulated_ready() -> Config {
    let mut config = simulated();
    config.cluster.simulated.ready_on_create = true;
    config
}

/// TOML text for a simulated-backend config file.
pub fn simulated_toml(ready_on_create: bool) -> String {
    format!(
        "[cluster]\nbackend = \"simulated\"\n\n[cluster.simulated]\nready_on_create = {ready_on_create}\n"
    )
}
