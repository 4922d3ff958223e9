//! Inbound (driving) ports consumed by inbound adapters such as the CLI.
//!
//! - [`tenancy`]: tenant and instance lifecycle use cases

pub mod tenancy;
