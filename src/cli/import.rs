use super::{job_environment, run_pipeline};
use crate::{
    config::ToolsConfig,
    exec::{CommandRunner, Environment},
    guest::archive_name,
    invocation::{ImportOptions, Repository, RestoreTarget},
    pipeline,
};
use anyhow::Result;

pub fn execute<R: CommandRunner>(
    options: &ImportOptions,
    repository: &Repository,
    tools: &ToolsConfig,
    env: &Environment,
    runner: &R,
) -> Result<()> {
    let kind = options.target.kind();
    tracing::info!("Importing {} guest {} from {}", kind, options.vmid, options.template);

    println!(
        "Try import {} VM #{} on storage: {} from file: {}",
        kind,
        options.vmid,
        options.storage,
        archive_name(&options.template, kind)
    );
    if let RestoreTarget::Container {
        hostname,
        root_size_gb,
    } = &options.target
    {
        println!("  Hostname: {}", hostname);
        println!("  Root size: {} GB", root_size_gb);
    }

    // Build restore pipeline
    let pipeline = pipeline::import_pipeline(tools, repository, options);
    println!("Command: {}", pipeline);

    // Run with the access key in the environment
    let job_env = job_environment(env, tools, repository);
    let result = run_pipeline(runner, &pipeline, &job_env, "import")?;

    // Report restore output
    println!("Import done");
    println!("{}", result.stdout);

    Ok(())
}
