//! CLI module graph and command dispatch.

pub mod command;
pub mod config;
pub mod demo;
pub mod diagnostic;
pub mod instance;
pub mod output;
pub mod tenant;

use tracing::debug;

use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::TenantOperations;
use command::{Cli, Commands, ConfigCommand, InstanceCommand, TenantCommand};

/// Run a parsed command line to completion.
///
/// Loads configuration (defaults if the file is absent), initializes logging,
/// wires the orchestrator and dispatches.
pub async fn run(cli: Cli) -> Result<()> {
    if let Commands::Config(ConfigCommand::Validate) = cli.command {
        return config::execute_validate(&cli.config);
    }

    let settings = Config::load_or_default(&cli.config)?;
    settings.init_logging();
    debug!(path = %cli.config.display(), "Configuration loaded");

    if let Commands::Config(ConfigCommand::Show) = cli.command {
        return config::execute_show(&cli.config, &settings);
    }

    let orchestrator = bootstrap::build_orchestrator(&settings).await?;
    let backend = orchestrator.backend_name();
    let ops: &dyn TenantOperations = &orchestrator;

    match &cli.command {
        Commands::Tenant(TenantCommand::Create(args)) => tenant::execute_create(ops, args).await,
        Commands::Tenant(TenantCommand::Get(arg)) => tenant::execute_get(ops, &arg.id).await,
        Commands::Tenant(TenantCommand::List) => tenant::execute_list(ops).await,
        Commands::Instance(InstanceCommand::Create(args)) => {
            instance::execute_create(ops, args).await
        }
        Commands::Instance(InstanceCommand::Get(args)) => instance::execute_get(ops, args).await,
        Commands::Instance(InstanceCommand::List(arg)) => {
            instance::execute_list(ops, &arg.id).await
        }
        Commands::Instance(InstanceCommand::Delete(args)) => {
            instance::execute_delete(ops, args).await
        }
        Commands::Demo(args) => demo::execute(ops, backend, args).await,
        Commands::Config(_) => Ok(()),
    }
}
