//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Identifier builders.
//! - [`config`] - Canonical test configurations (simulated backend).
//! - [`orchestrator`] - Orchestrators wired against the simulated control plane.

pub mod config;
pub mod domain;
pub mod orchestrator;
