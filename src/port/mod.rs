//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!   CLI ────────▶ │ TenantOperations         │
//!                 │   (application)          │
//!                 └────────────┬─────────────┘
//!                              │
//!               ┌──────────────┴──────────────┐
//!               ▼                             ▼
//!        ┌─────────────┐               ┌─────────────┐
//!        │ClusterClient│               │ TenantStore │
//!        │kube / sim.  │               │  memory     │
//!        └─────────────┘               └─────────────┘
//! ```

pub mod inbound;
pub mod outbound;

pub use inbound::tenancy::TenantOperations;
pub use outbound::cluster::{ClusterClient, ClusterResult};
pub use outbound::store::TenantStore;
