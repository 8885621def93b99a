use crate::guest::GuestKind;
use crate::invocation::{
    parse_root_size, ImportOptions, InvocationConfig, Operation, Repository, RestoreTarget,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pve-migrate")]
#[command(about = "Move Proxmox guests to and from a restic repository", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Tools configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a guest into the repository
    Export {
        #[command(flatten)]
        repository: RepositoryArgs,

        /// Guest id
        #[arg(short = 'm', long)]
        vmid: u32,
    },

    /// Import a guest from the repository
    Import {
        #[command(subcommand)]
        target: ImportCommands,
    },

    /// List archives stored in the repository
    List {
        #[command(flatten)]
        repository: RepositoryArgs,

        /// Only list archives of this guest type
        #[arg(short = 'y', long = "type", value_enum)]
        kind: Option<GuestKind>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Import an LXC container
    Lxc {
        #[command(flatten)]
        common: ImportArgs,

        /// Hostname for the new container (defaults to the template name)
        #[arg(short = 'n', long)]
        hostname: Option<String>,

        /// Root disk size in GB (e.g. 8, 8GiB)
        #[arg(short = 's', long, value_parser = parse_root_size)]
        size: u64,
    },

    /// Import a KVM virtual machine
    Kvm {
        #[command(flatten)]
        common: ImportArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RepositoryArgs {
    /// Repository URL
    #[arg(short = 'l', long, env = "PVE_MIGRATE_URL")]
    pub url: String,

    /// Repository password
    #[arg(short = 'p', long, env = "PVE_MIGRATE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Restic access key
    #[arg(short = 'k', long, conflicts_with = "ask_access_key")]
    pub access_key: Option<String>,

    /// Ask for the restic access key
    #[arg(short = 'K', long)]
    pub ask_access_key: bool,
}

impl RepositoryArgs {
    pub fn into_repository(self, access_key: Option<String>) -> Repository {
        Repository {
            url: self.url,
            password: self.password,
            access_key,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub repository: RepositoryArgs,

    /// Id for the restored guest
    #[arg(short = 'm', long)]
    pub vmid: u32,

    /// Template (archive name) to restore
    #[arg(short = 't', long)]
    pub template: String,

    /// Target storage
    #[arg(short = 'r', long)]
    pub storage: String,

    /// Allow overwriting an existing guest
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Keep the archived ethernet addresses instead of assigning unique ones
    #[arg(long = "no-unique", action = ArgAction::SetFalse)]
    pub unique: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Commands {
    pub fn repository_args(&self) -> &RepositoryArgs {
        match self {
            Commands::Export { repository, .. } | Commands::List { repository, .. } => repository,
            Commands::Import { target } => match target {
                ImportCommands::Lxc { common, .. } | ImportCommands::Kvm { common } => {
                    &common.repository
                }
            },
        }
    }

    /// Build the invocation, using `access_key` in place of the parsed flag.
    pub fn into_invocation(self, access_key: Option<String>) -> InvocationConfig {
        match self {
            Commands::Export { repository, vmid } => InvocationConfig {
                repository: repository.into_repository(access_key),
                operation: Operation::Export { vmid },
            },
            Commands::List {
                repository, kind, ..
            } => InvocationConfig {
                repository: repository.into_repository(access_key),
                operation: Operation::List { kind },
            },
            Commands::Import { target } => {
                let (common, target) = match target {
                    ImportCommands::Lxc {
                        common,
                        hostname,
                        size,
                    } => {
                        let hostname = hostname.unwrap_or_else(|| common.template.clone());
                        (
                            common,
                            RestoreTarget::Container {
                                hostname,
                                root_size_gb: size,
                            },
                        )
                    }
                    ImportCommands::Kvm { common } => (common, RestoreTarget::Vm),
                };

                InvocationConfig {
                    repository: common.repository.into_repository(access_key),
                    operation: Operation::Import(ImportOptions {
                        vmid: common.vmid,
                        template: common.template,
                        storage: common.storage,
                        force: common.force,
                        unique: common.unique,
                        target,
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod args_tests;
