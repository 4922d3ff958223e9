//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tenant-spinner binary using `clap`:
//! tenant and instance lifecycle commands, a guided demo, and configuration
//! utilities.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default configuration file path.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Tenant and instance lifecycle orchestration CLI
#[derive(Parser, Debug)]
#[command(name = "tenant-spinner")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults apply if it does not exist)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage tenants
    #[command(subcommand)]
    Tenant(TenantCommand),

    /// Manage tenant instances
    #[command(subcommand)]
    Instance(InstanceCommand),

    /// Walk through creating a tenant and an instance
    Demo(DemoArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `tenant-spinner tenant`.
#[derive(Subcommand, Debug)]
pub enum TenantCommand {
    /// Register a tenant and provision its namespace.
    Create(TenantCreateArgs),
    /// Show a registered tenant.
    Get(TenantIdArg),
    /// List registered tenants.
    List,
}

/// Subcommands for `tenant-spinner instance`.
#[derive(Subcommand, Debug)]
pub enum InstanceCommand {
    /// Create an instance (deployment and service) for a tenant.
    Create(InstanceCreateArgs),
    /// Show an instance and its current status.
    Get(InstanceRefArgs),
    /// List the instances of a tenant.
    List(TenantIdArg),
    /// Delete an instance.
    Delete(InstanceRefArgs),
}

/// Subcommands for `tenant-spinner config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// Arguments for `tenant create`.
#[derive(Args, Debug)]
pub struct TenantCreateArgs {
    /// Tenant identifier (DNS label)
    pub id: String,

    /// Display name
    #[arg(long)]
    pub name: String,
}

/// A single tenant identifier.
#[derive(Args, Debug)]
pub struct TenantIdArg {
    /// Tenant identifier
    pub id: String,
}

/// Arguments for `instance create`.
#[derive(Args, Debug)]
pub struct InstanceCreateArgs {
    /// Owning tenant identifier
    pub tenant: String,

    /// Instance identifier (DNS label)
    pub instance: String,

    /// Display name used if the tenant is not yet registered
    #[arg(long)]
    pub tenant_name: Option<String>,
}

/// A (tenant, instance) pair.
#[derive(Args, Debug)]
pub struct InstanceRefArgs {
    /// Owning tenant identifier
    pub tenant: String,

    /// Instance identifier
    pub instance: String,
}

/// Arguments for `demo`.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Tenant identifier to create
    #[arg(long, default_value = "acme")]
    pub tenant: String,

    /// Instance identifier to create
    #[arg(long, default_value = "instance-1")]
    pub instance: String,

    /// Seconds to wait before reading the instance status
    #[arg(long, default_value_t = 5)]
    pub wait_secs: u64,
}
