//! Infrastructure configuration modules.

pub mod cluster;
pub mod logging;
pub mod settings;
