use super::{job_environment, run_pipeline};
use crate::{
    config::ToolsConfig,
    exec::{CommandRunner, Environment},
    guest::GuestResolver,
    invocation::Repository,
    pipeline, MigrateError,
};
use anyhow::Result;

pub fn execute<R: CommandRunner>(
    vmid: u32,
    repository: &Repository,
    tools: &ToolsConfig,
    env: &Environment,
    runner: &R,
) -> Result<()> {
    tracing::info!("Exporting guest: {}", vmid);

    println!("Start export VM #{}", vmid);

    // Look up the guest, containers first
    let resolver = GuestResolver::new(runner, env);
    let guest = resolver
        .resolve(vmid)?
        .ok_or(MigrateError::GuestNotFound(vmid))?;

    println!(
        "Found {} VM id {} with name {} ({})",
        guest.kind, guest.id, guest.name, guest.status
    );
    if let Some(lock) = &guest.lock {
        tracing::warn!(vmid, lock = %lock, "Guest is locked");
    }

    // Build backup pipeline
    let pipeline = pipeline::export_pipeline(tools, repository, &guest);
    println!("Command: {}", pipeline);

    // Run with the access key in the environment
    let job_env = job_environment(env, tools, repository);
    let result = run_pipeline(runner, &pipeline, &job_env, "export")?;

    println!("Export done");
    println!("  Archive: {}", guest.archive_name());
    println!("MESSAGE:");
    println!("{}", result.stdout);
    println!("INFO:");
    println!("{}", result.stderr);

    Ok(())
}
