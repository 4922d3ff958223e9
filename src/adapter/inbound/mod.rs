//! Inbound adapters: the ways callers drive the orchestrator.

pub mod cli;
