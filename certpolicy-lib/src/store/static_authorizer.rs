use super::Binding;
use crate::Result;
use crate::api::UserInfo;
use crate::approver::WildcardPattern;
use crate::manager::{Authorizer, POLICY_API_GROUP, POLICY_RESOURCE, ResourceAttributes, USE_VERB};
use ohno::EnrichableExt;

const LOG_TARGET: &str = "authorizer";

/// An [`Authorizer`] answering policy `use` checks from a fixed set of bindings.
///
/// Anything other than `use` on a policy is denied.
#[derive(Debug, Clone)]
pub struct StaticAuthorizer {
    bindings: Vec<(WildcardPattern, Binding)>,
}

impl StaticAuthorizer {
    /// # Errors
    ///
    /// Returns an error if the policy pattern of a binding cannot be compiled
    pub fn new(bindings: impl IntoIterator<Item = Binding>) -> Result<Self> {
        let bindings = bindings
            .into_iter()
            .map(|binding| {
                let pattern = WildcardPattern::new(&binding.policy)
                    .map_err(|e| e.enrich(format!("invalid policy pattern '{}' in binding", binding.policy)))?;
                Ok((pattern, binding))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { bindings })
    }

    fn allows(&self, user: &UserInfo, resource: &ResourceAttributes) -> bool {
        if resource.verb != USE_VERB || resource.group != POLICY_API_GROUP || resource.resource != POLICY_RESOURCE {
            return false;
        }

        self.bindings.iter().any(|(pattern, binding)| {
            pattern.matches(&resource.name) && binding.covers_namespace(&resource.namespace) && binding.has_subject(user)
        })
    }
}

impl Authorizer for StaticAuthorizer {
    async fn check(&self, user: &UserInfo, resource: &ResourceAttributes) -> Result<bool> {
        let allowed = self.allows(user, resource);
        log::debug!(
            target: LOG_TARGET,
            "'{}' {} '{}' policy '{}' in namespace '{}'",
            user.username,
            if allowed { "may" } else { "may not" },
            resource.verb,
            resource.name,
            resource.namespace
        );

        Ok(allowed)
    }
}
