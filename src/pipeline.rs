//! Shell pipeline assembly.
//!
//! Every builder here is a pure function of its inputs: the same repository,
//! guest and options always produce byte-identical command text. The text is
//! handed to a shell as-is; nothing is quoted or escaped.

use crate::config::ToolsConfig;
use crate::guest::{archive_name, GuestKind, GuestRecord};
use crate::invocation::{ImportOptions, Repository, RestoreTarget};
use std::fmt;

const MASK: &str = "***";

/// A complete shell command line plus the secrets it embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    text: String,
    secrets: Vec<String>,
}

impl Pipeline {
    fn new(text: String, repository: &Repository) -> Self {
        let secrets = if repository.password.is_empty() {
            vec![]
        } else {
            vec![repository.password.clone()]
        };
        Self { text, secrets }
    }

    /// Exact text passed to the shell
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Displays the command with secrets masked.
impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = self.text.clone();
        for secret in &self.secrets {
            shown = shown.replace(secret.as_str(), MASK);
        }
        f.write_str(&shown)
    }
}

/// `. <loader> <url> <password>`: sources the repository credentials.
pub fn login_prefix(tools: &ToolsConfig, repository: &Repository) -> String {
    format!(
        ". {} {} {}",
        tools.env_loader, repository.url, repository.password
    )
}

/// Stop-mode dump of `guest` streamed into `restic backup`.
pub fn export_pipeline(
    tools: &ToolsConfig,
    repository: &Repository,
    guest: &GuestRecord,
) -> Pipeline {
    let kind = guest.kind;
    let dump = format!(
        "vzdump {} --mode stop --stdout --compress zstd \
         | ifne restic backup -v --stdin --stdin-filename {} \
         --tag {} --tag {}_{} --tag {}",
        guest.id,
        guest.archive_name(),
        guest.name,
        guest.name,
        kind,
        kind
    );

    Pipeline::new(
        format!("{} && {}", login_prefix(tools, repository), dump),
        repository,
    )
}

/// Latest archive of `options.template` fetched from restic and restored.
pub fn import_pipeline(
    tools: &ToolsConfig,
    repository: &Repository,
    options: &ImportOptions,
) -> Pipeline {
    let kind = options.target.kind();
    let pull = format!(
        "restic dump latest {} --tag {} --tag {}_{} | zstd -d -c",
        archive_name(&options.template, kind),
        kind,
        options.template,
        kind
    );

    Pipeline::new(
        format!(
            "{} && {} | {}",
            login_prefix(tools, repository),
            pull,
            restore_command(options)
        ),
        repository,
    )
}

/// `pct restore` or `qmrestore` reading the archive from stdin.
pub fn restore_command(options: &ImportOptions) -> String {
    let flags = format!("--unique {} --force {}", options.unique, options.force);

    match &options.target {
        RestoreTarget::Container {
            hostname,
            root_size_gb,
        } => format!(
            "pct restore {} - --hostname {} --storage {} --rootfs {} {}",
            options.vmid, hostname, options.storage, root_size_gb, flags
        ),
        RestoreTarget::Vm => format!(
            "qmrestore - {} --storage {} {}",
            options.vmid, options.storage, flags
        ),
    }
}

/// Latest snapshot per tag set, optionally narrowed to one guest kind.
///
/// Output is unfiltered; non-archive rows are dropped by the listing parser so the
/// pipeline's status is restic's own and an empty repository still succeeds.
pub fn list_pipeline(
    tools: &ToolsConfig,
    repository: &Repository,
    kind: Option<GuestKind>,
) -> Pipeline {
    let tag_filter = match kind {
        Some(kind) => format!(" --tag {}", kind),
        None => String::new(),
    };

    Pipeline::new(
        format!(
            "{} && restic snapshots --last{}",
            login_prefix(tools, repository),
            tag_filter
        ),
        repository,
    )
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;
