use thiserror::Error;

/// Exit status for an operation that ran and failed.
pub const EXIT_FAILURE: u8 = 100;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Guest with ID {0} not found")]
    GuestNotFound(u32),

    #[error("{operation} failed with exit code {code}")]
    CommandFailed {
        operation: String,
        code: String,
        stderr: String,
    },

    #[error("Failed to spawn {shell}: {source}")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Empty access key")]
    EmptyAccessKey,

    #[error("Access key prompt failed: {0}")]
    Prompt(String),

    #[error("Invalid root size '{0}': {1}")]
    InvalidSize(String, String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),
}

impl MigrateError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MigrateError::GuestNotFound(_) => 1,
            MigrateError::EmptyAccessKey | MigrateError::InvalidSize(..) => 2,
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;

/// Process exit status for an error returned by a command.
///
/// Looks through any added context for a `MigrateError`; anything else is a failure.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<MigrateError>())
        .map(MigrateError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
