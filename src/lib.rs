pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod exec;
pub mod guest;
pub mod invocation;
pub mod pipeline;
pub mod templates;

pub use error::{MigrateError, Result};
