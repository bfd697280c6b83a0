use super::{AttributeEvaluator, Evaluator};
use crate::Result;
use ohno::bail;
use std::sync::Arc;

const LOG_TARGET: &str = "  registry";

/// The set of evaluators consulted for every policy.
///
/// The registry is assembled once at startup and then shared read-only by every
/// review. It always contains the [`AttributeEvaluator`]; additional evaluators are
/// appended with [`Registry::register`] and run in registration order.
#[derive(Debug, Clone)]
pub struct Registry {
    evaluators: Vec<Arc<dyn Evaluator>>,
}

impl Registry {
    /// Create a registry holding only the built-in attribute evaluator
    #[must_use]
    pub fn new() -> Self {
        Self {
            evaluators: vec![Arc::new(AttributeEvaluator)],
        }
    }

    /// Add an evaluator
    ///
    /// # Errors
    ///
    /// Returns an error if an evaluator with the same name is already registered.
    /// This is a startup misconfiguration and should stop the process.
    pub fn register(&mut self, evaluator: Arc<dyn Evaluator>) -> Result<()> {
        if self.contains(evaluator.name()) {
            bail!("an evaluator named '{}' is already registered", evaluator.name());
        }

        log::debug!(target: LOG_TARGET, "Registered evaluator '{}'", evaluator.name());
        self.evaluators.push(evaluator);
        Ok(())
    }

    /// Builder-style variant of [`Registry::register`]
    ///
    /// # Errors
    ///
    /// Returns an error if an evaluator with the same name is already registered
    pub fn with(mut self, evaluator: Arc<dyn Evaluator>) -> Result<Self> {
        self.register(evaluator)?;
        Ok(self)
    }

    #[must_use]
    pub fn evaluators(&self) -> &[Arc<dyn Evaluator>] {
        &self.evaluators
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.evaluators.iter().map(|e| e.name())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
