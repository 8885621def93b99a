use crate::{MigrateError, Result};
use std::fmt::Display;

const PROMPT: &str = "Restic repository access key";

/// Decide which access key, if any, is exported to the pipeline.
///
/// `prompt` is only called when `ask` is set. A prompted key must be non-empty.
pub fn resolve_access_key<F, E>(explicit: Option<String>, ask: bool, prompt: F) -> Result<Option<String>>
where
    F: FnOnce() -> std::result::Result<String, E>,
    E: Display,
{
    if !ask {
        return Ok(explicit);
    }

    let key = prompt().map_err(|e| MigrateError::Prompt(e.to_string()))?;
    if key.is_empty() {
        return Err(MigrateError::EmptyAccessKey);
    }
    Ok(Some(key))
}

/// Read the access key from the terminal without echo.
pub fn prompt_access_key() -> std::result::Result<String, dialoguer::Error> {
    dialoguer::Password::new()
        .with_prompt(PROMPT)
        .allow_empty_password(true)
        .interact()
}
