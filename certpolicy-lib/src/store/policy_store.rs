use crate::Result;
use crate::api::Policy;
use crate::approver::{Registry, reconcile};
use crate::manager::PolicyLister;

const LOG_TARGET: &str = "     store";

/// A [`PolicyLister`] over a fixed set of policies.
///
/// Policies are reconciled against the registry when the store is built, so their
/// status reflects whether every evaluator accepts them.
#[derive(Debug, Clone, Default)]
pub struct PolicyStore {
    policies: Vec<Policy>,
}

impl PolicyStore {
    /// # Errors
    ///
    /// Returns an error if an evaluator fails while checking a policy
    pub fn new(registry: &Registry, policies: impl IntoIterator<Item = Policy>) -> Result<Self> {
        let policies = policies
            .into_iter()
            .map(|policy| {
                let status = reconcile(registry, &policy)?;
                Ok(policy.with_status(status))
            })
            .collect::<Result<Vec<Policy>>>()?;

        log::debug!(
            target: LOG_TARGET,
            "Loaded {} policies, {} ready",
            policies.len(),
            policies.iter().filter(|p| p.status.ready).count()
        );

        Ok(Self { policies })
    }

    #[must_use]
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }
}

impl PolicyLister for PolicyStore {
    async fn list(&self) -> Result<Vec<Policy>> {
        Ok(self.policies.clone())
    }
}
