//! tenant-spinner - tenant and instance lifecycle orchestration on a
//! container control plane.
//!
//! Each tenant maps 1:1 to a namespace (`tenant-<id>`); each instance is a
//! single-replica deployment plus service (`instance-<id>`) inside it.
//! Instance state is never stored locally: every read reconstructs it from
//! the control plane and derives a lifecycle status from replica counts.
//!
//! # Architecture
//!
//! - [`domain`] - Identifiers, tenants, instances, workload specs, status derivation
//! - [`port`] - Inbound (`TenantOperations`) and outbound (`ClusterClient`,
//!   `TenantStore`) traits
//! - [`application`] - Tenant and instance orchestrators
//! - [`adapter`] - CLI front door; Kubernetes, simulated and in-memory backends
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tenant_spinner::adapter::outbound::{MemoryTenantStore, SimulatedCluster};
//! use tenant_spinner::application::TenantOrchestrator;
//! use tenant_spinner::domain::{InstanceId, TenantId, WorkloadTemplate};
//! use tenant_spinner::port::TenantOperations;
//!
//! # async fn demo() -> tenant_spinner::error::Result<()> {
//! let orchestrator = TenantOrchestrator::new(
//!     Arc::new(SimulatedCluster::new()),
//!     Arc::new(MemoryTenantStore::new()),
//!     WorkloadTemplate::default(),
//! );
//! let acme = TenantId::parse("acme")?;
//! orchestrator.create_tenant(&acme, "Acme Corporation").await?;
//! orchestrator
//!     .create_instance(&acme, &InstanceId::parse("web")?)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
