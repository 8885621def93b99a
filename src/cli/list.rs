use super::{job_environment, run_pipeline, OutputFormat};
use crate::{
    config::ToolsConfig,
    exec::{CommandRunner, Environment},
    guest::GuestKind,
    invocation::Repository,
    pipeline,
    templates::{parse_snapshot_listing, TemplateEntry},
};
use anyhow::Result;

pub fn execute<R: CommandRunner>(
    kind: Option<GuestKind>,
    format: OutputFormat,
    repository: &Repository,
    tools: &ToolsConfig,
    env: &Environment,
    runner: &R,
) -> Result<()> {
    let entries = fetch(kind, repository, tools, env, runner)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            println!("Templates:");
            for entry in &entries {
                println!("{}", entry.file);
            }
        }
    }

    Ok(())
}

/// Run the list pipeline and parse the archives it reports.
pub fn fetch<R: CommandRunner>(
    kind: Option<GuestKind>,
    repository: &Repository,
    tools: &ToolsConfig,
    env: &Environment,
    runner: &R,
) -> Result<Vec<TemplateEntry>> {
    tracing::info!("Listing templates");

    let pipeline = pipeline::list_pipeline(tools, repository, kind);
    tracing::debug!(command = %pipeline, "List command");

    let job_env = job_environment(env, tools, repository);
    let result = run_pipeline(runner, &pipeline, &job_env, "showing list")?;

    let entries = parse_snapshot_listing(&result.stdout, kind);
    tracing::debug!(count = entries.len(), "Parsed snapshot listing");

    Ok(entries)
}
