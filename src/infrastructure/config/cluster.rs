//! Control-plane backend configuration.

use serde::{Deserialize, Serialize};

/// Which control plane the orchestrator talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterBackend {
    /// Kubernetes API server reached through ambient kubeconfig.
    #[default]
    Kubernetes,
    /// In-process simulated control plane.
    Simulated,
}

impl ClusterBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kubernetes => "kubernetes",
            Self::Simulated => "simulated",
        }
    }
}

/// Options for the simulated backend.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimulatedClusterConfig {
    /// Report every replica ready as soon as a workload is created.
    ///
    /// Defaults to false: workloads start with zero ready replicas.
    #[serde(default)]
    pub ready_on_create: bool,
}

/// The `[cluster]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClusterConfig {
    /// Control-plane backend. Defaults to Kubernetes.
    #[serde(default)]
    pub backend: ClusterBackend,

    /// Simulated backend options.
    #[serde(default)]
    pub simulated: SimulatedClusterConfig,
}
