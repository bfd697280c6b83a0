#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Approval engine for certificate signing requests
//!
//! Decides whether a certificate signing request should be approved, based on a set of
//! declaratively configured policies and the identity of the requester.
//!
//! # Module Organization
//!
//! - [`api`]: Signing requests, policies and requester identities
//! - [`approver`]: Evaluators, the evaluator registry and policy reconciliation
//! - [`manager`]: Policy selection and decision aggregation
//! - [`webhook`]: Admission wire types and the validation boundary
//! - [`store`]: File-backed policy lister and authorizer
//! - `commands`: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod api;
pub mod approver;
pub mod manager;
pub mod store;
pub mod webhook;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(test)]
mod fake;

pub use crate::commands::{Host, run};
