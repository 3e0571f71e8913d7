//! backend_infra - CLI shell around `backend_infra_core`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod prelude;

pub use config::Config;
pub use error::{CliError, Result};
