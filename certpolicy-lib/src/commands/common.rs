//! Shared arguments, logging setup and engine assembly.

use super::config::Config;
use crate::Result;
use crate::approver::Registry;
use crate::manager::Manager;
use crate::store::{PolicyStore, StaticAuthorizer};
use crate::webhook::Validator;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use std::sync::Arc;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is `certpolicy.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Initialize the logger based on log level
///
/// Only the first call in a process takes effect.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Assemble the validation boundary described by `config`
///
/// The registry holds only the built-in attribute evaluator. Policies are reconciled
/// against it before the validator is returned.
///
/// # Errors
///
/// Returns an error if a policy cannot be reconciled or a binding pattern is invalid
pub fn build_validator(config: &Config) -> Result<Validator<PolicyStore, StaticAuthorizer>> {
    let registry = Arc::new(Registry::new());
    let store = PolicyStore::new(&registry, config.policies.iter().cloned())?;
    let authorizer = StaticAuthorizer::new(config.bindings.iter().cloned())?;

    Ok(Validator::new(
        Manager::new(store, authorizer, registry),
        config.review_timeout,
        config.on_unprocessed,
    ))
}
