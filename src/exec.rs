use crate::{MigrateError, Result};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

/// Environment handed to a subprocess.
///
/// `base` is captured once from the parent process; entries in `overrides`
/// win over `base` when both define the same variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    base: BTreeMap<OsString, OsString>,
    overrides: BTreeMap<OsString, OsString>,
}

impl Environment {
    pub fn new(base: BTreeMap<OsString, OsString>) -> Self {
        Self {
            base,
            overrides: BTreeMap::new(),
        }
    }

    /// Snapshot of the current process environment, non-UTF-8 entries included
    pub fn inherit() -> Self {
        Self::new(std::env::vars_os().collect())
    }

    pub fn with_override(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    pub fn overrides(&self) -> &BTreeMap<OsString, OsString> {
        &self.overrides
    }

    /// Effective value of `key`
    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        self.overrides
            .get(key)
            .or_else(|| self.base.get(key))
            .map(OsString::as_os_str)
    }

    pub fn merged(&self) -> BTreeMap<OsString, OsString> {
        let mut env = self.base.clone();
        env.extend(self.overrides.clone());
        env
    }
}

/// Outcome of one subprocess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code_display(&self) -> String {
        match self.code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }

    /// Turn a non-zero exit into `CommandFailed` for `operation`.
    pub fn check(self, operation: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(MigrateError::CommandFailed {
                operation: operation.to_string(),
                code: self.code_display(),
                stderr: self.stderr,
            })
        }
    }
}

/// Runs a shell command line and captures its output.
pub trait CommandRunner {
    fn run(&self, command: &str, env: &Environment) -> Result<CommandResult>;
}

/// Runs commands through `<shell> -c`.
pub struct ShellRunner {
    shell: PathBuf,
}

impl ShellRunner {
    pub fn new(shell: PathBuf) -> Self {
        Self { shell }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, env: &Environment) -> Result<CommandResult> {
        tracing::debug!(
            shell = %self.shell.display(),
            overrides = env.overrides().len(),
            "Spawning shell job"
        );

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .env_clear()
            .envs(env.merged())
            .output()
            .map_err(|source| MigrateError::Spawn {
                shell: self.shell.display().to_string(),
                source,
            })?;

        let result = CommandResult {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(code = %result.code_display(), "Shell job finished");

        Ok(result)
    }
}
