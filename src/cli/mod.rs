// CLI module - argument parsing and the three operations
pub mod args;
pub mod export;
pub mod import;
pub mod list;

pub use args::{Cli, Commands, ImportCommands, OutputFormat};

use crate::config::ToolsConfig;
use crate::exec::{CommandResult, CommandRunner, Environment};
use crate::invocation::{Operation, Repository};
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the operation selected by `command`.
///
/// `access_key` replaces whatever key was parsed, so a prompted key can be passed in.
pub fn dispatch<R: CommandRunner>(
    command: Commands,
    access_key: Option<String>,
    tools: &ToolsConfig,
    env: &Environment,
    runner: &R,
) -> Result<()> {
    let format = match &command {
        Commands::List { format, .. } => *format,
        _ => OutputFormat::Text,
    };

    let invocation = command.into_invocation(access_key);
    let repository = &invocation.repository;

    match invocation.operation {
        Operation::Export { vmid } => export::execute(vmid, repository, tools, env, runner),
        Operation::Import(options) => import::execute(&options, repository, tools, env, runner),
        Operation::List { kind } => list::execute(kind, format, repository, tools, env, runner),
    }
}

/// Environment for a pipeline: `base` plus the access key, when one was given.
pub fn job_environment(base: &Environment, tools: &ToolsConfig, repository: &Repository) -> Environment {
    match &repository.access_key {
        Some(key) => base.clone().with_override(tools.access_key_var.clone(), key.clone()),
        None => base.clone(),
    }
}

/// Run `pipeline`, printing captured stderr when it fails.
fn run_pipeline<R: CommandRunner>(
    runner: &R,
    pipeline: &Pipeline,
    env: &Environment,
    operation: &str,
) -> Result<CommandResult> {
    tracing::debug!(command = %pipeline, "Running {} pipeline", operation);

    let result = runner.run(pipeline.as_str(), env)?;

    if !result.success() {
        tracing::warn!(code = %result.code_display(), "{} pipeline failed", operation);
        println!("Error in {}", operation);
        println!("{}", result.stderr);
    }

    Ok(result.check(operation)?)
}
