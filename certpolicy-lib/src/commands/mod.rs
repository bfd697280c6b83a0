//! Command-line interface and orchestration for certpolicy
//!
//! # Implementation Model
//!
//! The module is organized around three commands:
//!
//! - **review**: Decode an admission request, run it through the validation boundary
//!   with the policies and bindings from the configuration, and print the admission
//!   response
//! - **validate**: Load the configuration, reconcile every policy and report which
//!   policies are ready
//! - **init**: Generate a default configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. The `common` module holds the arguments shared by
//! every command, logging setup, and the assembly of the engine from a `Config`.

mod common;
mod config;
mod host;
mod init;
mod review;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use review::{ReviewArgs, review_request};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
