use anyhow::Result;
use clap::Parser;
use pve_migrate::{
    cli::{self, Cli},
    config::ToolsConfig,
    credentials,
    error::{self, EXIT_FAILURE},
    exec::{Environment, ShellRunner},
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = error::exit_code(&err);

            eprintln!("Error: {:#}", err);
            if code == EXIT_FAILURE {
                eprintln!("Failed");
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let tools = ToolsConfig::load(cli.config.as_deref())?;

    let repository = cli.command.repository_args();
    let access_key = credentials::resolve_access_key(
        repository.access_key.clone(),
        repository.ask_access_key,
        credentials::prompt_access_key,
    )?;

    // Read once; every subprocess gets this plus its own overrides
    let env = Environment::inherit();
    let runner = ShellRunner::new(tools.shell.clone());

    cli::dispatch(cli.command, access_key, &tools, &env, &runner)
}
