//! Decides whether a policy is fit to take part in reviews

use super::{ATTRIBUTE_EVALUATOR_NAME, Registry};
use crate::Result;
use crate::api::{Policy, PolicyStatus};
use ohno::EnrichableExt;

const LOG_TARGET: &str = "reconciler";

/// An evaluator's opinion on whether a policy is well-formed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyResponse {
    /// Problems that keep the policy from being ready; empty when ready
    pub errors: Vec<String>,
}

impl ReadyResponse {
    #[must_use]
    pub const fn ready() -> Self {
        Self { errors: Vec::new() }
    }

    #[must_use]
    pub const fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compute the status of `policy` against the evaluators in `registry`.
///
/// A policy is ready when it only configures registered plugins and every
/// evaluator reports it as ready. The reasons of every failing check are kept.
///
/// # Errors
///
/// Returns an error if an evaluator fails to determine readiness
pub fn reconcile(registry: &Registry, policy: &Policy) -> Result<PolicyStatus> {
    let mut reasons = Vec::new();

    for plugin in policy.spec.plugins.keys() {
        if plugin == ATTRIBUTE_EVALUATOR_NAME {
            reasons.push(format!("plugins.{plugin}: the built-in evaluator cannot be configured as a plugin"));
        } else if !registry.contains(plugin) {
            reasons.push(format!("plugins.{plugin}: no evaluator with this name is registered"));
        }
    }

    for evaluator in registry.evaluators() {
        let response = evaluator
            .ready(policy)
            .map_err(|e| e.enrich(format!("evaluator '{}' could not check policy '{}'", evaluator.name(), policy.name)))?;
        reasons.extend(response.errors);
    }

    if reasons.is_empty() {
        log::debug!(target: LOG_TARGET, "Policy '{}' is ready", policy.name);
        Ok(PolicyStatus::ready())
    } else {
        log::info!(target: LOG_TARGET, "Policy '{}' is not ready: {}", policy.name, reasons.join("; "));
        Ok(PolicyStatus::not_ready(reasons))
    }
}
