//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic: configuration and the wiring of adapters into the
//! orchestrator.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
