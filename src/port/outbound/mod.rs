//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the cluster control
//! plane and the tenant registry storage.

pub mod cluster;
pub mod store;
