use super::predicate::{LOCAL_PREDICATES, rbac_bound};
use super::{Authorizer, EvaluatorDenial, PolicyDenial, PolicyLister, ReviewResponse, UnprocessedReason};
use crate::Result;
use crate::api::SigningRequest;
use crate::approver::{EvaluationResponse, Registry};
use ohno::EnrichableExt;
use std::sync::Arc;

const LOG_TARGET: &str = "    review";

/// Reviews signing requests against the policies bound to their requester.
///
/// A manager is cheap to share: it holds no per-request state, so concurrent
/// reviews need no locking.
#[derive(Debug)]
pub struct Manager<L, A> {
    lister: L,
    authorizer: A,
    registry: Arc<Registry>,
}

impl<L: PolicyLister, A: Authorizer> Manager<L, A> {
    #[must_use]
    pub const fn new(lister: L, authorizer: A, registry: Arc<Registry>) -> Self {
        Self {
            lister,
            authorizer,
            registry,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Decide whether `request` should be approved
    ///
    /// Dropping the returned future cancels any collaborator call in flight.
    ///
    /// # Errors
    ///
    /// Returns an error if listing policies, checking authorization, or running an
    /// evaluator fails. No partial decision is returned in that case.
    pub async fn review(&self, request: &SigningRequest) -> Result<ReviewResponse> {
        let policies = self.lister.list().await.map_err(|e| e.enrich("could not list policies"))?;

        if policies.is_empty() {
            log::info!(target: LOG_TARGET, "No policies exist, leaving request '{}' unprocessed", request.common_name);
            return Ok(ReviewResponse::Unprocessed {
                reason: UnprocessedReason::NoPolicies,
            });
        }

        let mut candidates = policies;
        for (name, predicate) in LOCAL_PREDICATES {
            let before = candidates.len();
            candidates = predicate(request, candidates).map_err(|e| e.enrich(format!("could not apply the '{name}' predicate")))?;
            log::debug!(target: LOG_TARGET, "Predicate '{name}' kept {} of {before} policies", candidates.len());
        }

        if !candidates.is_empty() {
            let before = candidates.len();
            candidates = rbac_bound(&self.authorizer, request, candidates)
                .await
                .map_err(|e| e.enrich("could not determine bound policies"))?;
            log::debug!(target: LOG_TARGET, "Predicate 'rbac_bound' kept {} of {before} policies", candidates.len());
        }

        if candidates.is_empty() {
            log::info!(target: LOG_TARGET, "No policies apply to request '{}' from '{}'", request.common_name, request.user.username);
            return Ok(ReviewResponse::Unprocessed {
                reason: UnprocessedReason::NoneApplicable,
            });
        }

        let mut denials = Vec::new();
        for policy in &candidates {
            let mut evaluator_denials = Vec::new();

            // run every evaluator, even after a denial, so the message is complete
            for evaluator in self.registry.evaluators() {
                let response = evaluator.evaluate(policy, request).map_err(|e| {
                    e.enrich(format!("evaluator '{}' failed on policy '{}'", evaluator.name(), policy.name))
                })?;

                if let EvaluationResponse::Denied(violations) = response {
                    evaluator_denials.push(EvaluatorDenial::new(evaluator.name(), violations));
                }
            }

            if evaluator_denials.is_empty() {
                log::info!(target: LOG_TARGET, "Request '{}' approved by policy '{}'", request.common_name, policy.name);
                return Ok(ReviewResponse::Approved {
                    policy: policy.name.clone(),
                });
            }

            log::debug!(target: LOG_TARGET, "Policy '{}' denied request '{}'", policy.name, request.common_name);
            denials.push(PolicyDenial::new(policy.name.clone(), evaluator_denials));
        }

        denials.sort_by(|a, b| a.policy.cmp(&b.policy));

        log::info!(target: LOG_TARGET, "Request '{}' denied by {} policies", request.common_name, denials.len());
        Ok(ReviewResponse::Denied { denials })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{IssuerRef, IssuerRefPattern, Policy, PolicySpec, UserInfo};
    use crate::approver::Violation;
    use crate::fake::{FakeAuthorizer, FakeEvaluator, FakeLister, ready_policy};
    use core::time::Duration;

    fn request() -> SigningRequest {
        SigningRequest {
            common_name: "test".to_string(),
            issuer_ref: IssuerRef::new("my-issuer", "Issuer", "cert-manager.io"),
            namespace: "default".to_string(),
            user: UserInfo::new("alice"),
            ..SigningRequest::default()
        }
    }

    fn cn_policy(name: &str, allowed_common_name: &str) -> Policy {
        ready_policy(
            name,
            PolicySpec {
                allowed_common_name: Some(allowed_common_name.to_string()),
                ..PolicySpec::default()
            },
        )
    }

    fn manager(policies: Vec<Policy>, authorizer: FakeAuthorizer) -> Manager<FakeLister, FakeAuthorizer> {
        Manager::new(FakeLister::new(policies), authorizer, Arc::new(Registry::new()))
    }

    fn denied_policies(response: &ReviewResponse) -> Vec<&str> {
        match response {
            ReviewResponse::Denied { denials } => denials.iter().map(|d| d.policy.as_str()).collect(),
            other => panic!("expected a denial, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_policies_is_unprocessed() {
        let response = manager(Vec::new(), FakeAuthorizer::allowing(&[])).review(&request()).await.unwrap();
        assert_eq!(
            response,
            ReviewResponse::Unprocessed {
                reason: UnprocessedReason::NoPolicies
            }
        );
        assert_eq!(response.message(), "No policies exist");
    }

    #[tokio::test]
    async fn test_no_bound_policies_is_unprocessed() {
        let authorizer = FakeAuthorizer::allowing(&[]);
        let response = manager(vec![cn_policy("a", "*"), cn_policy("b", "*")], authorizer)
            .review(&request())
            .await
            .unwrap();

        assert_eq!(
            response,
            ReviewResponse::Unprocessed {
                reason: UnprocessedReason::NoneApplicable
            }
        );
        assert_eq!(response.message(), "No policies bound or applicable");
    }

    #[tokio::test]
    async fn test_unready_policies_never_reach_the_authorizer() {
        let authorizer = FakeAuthorizer::allowing(&["a"]);
        let mgr = Manager::new(
            FakeLister::new(vec![Policy::new("a", PolicySpec::default())]),
            authorizer,
            Arc::new(Registry::new()),
        );

        let response = mgr.review(&request()).await.unwrap();
        assert!(matches!(response, ReviewResponse::Unprocessed { .. }));
        assert!(mgr.authorizer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unselected_policies_are_unprocessed() {
        let policy = ready_policy(
            "other-issuer",
            PolicySpec {
                issuer_ref_selector: IssuerRefPattern::new(Some("other"), None, None),
                ..PolicySpec::default()
            },
        );

        let response = manager(vec![policy], FakeAuthorizer::allowing(&["other-issuer"]))
            .review(&request())
            .await
            .unwrap();
        assert!(matches!(
            response,
            ReviewResponse::Unprocessed {
                reason: UnprocessedReason::NoneApplicable
            }
        ));
    }

    #[tokio::test]
    async fn test_unconstrained_policy_approves() {
        let response = manager(vec![ready_policy("open", PolicySpec::default())], FakeAuthorizer::allowing(&["open"]))
            .review(&request())
            .await
            .unwrap();

        assert_eq!(
            response,
            ReviewResponse::Approved {
                policy: "open".to_string()
            }
        );
        assert_eq!(response.message(), r#"Approved by policy: "open""#);
    }

    #[tokio::test]
    async fn test_first_satisfying_policy_in_listing_order_approves() {
        let policies = vec![cn_policy("z-deny", "nope"), cn_policy("y-allow", "te*"), cn_policy("a-allow", "*")];
        let response = manager(policies, FakeAuthorizer::allowing(&["z-deny", "y-allow", "a-allow"]))
            .review(&request())
            .await
            .unwrap();

        assert_eq!(
            response,
            ReviewResponse::Approved {
                policy: "y-allow".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unbound_policy_cannot_approve() {
        let policies = vec![cn_policy("bound", "nope"), cn_policy("unbound", "*")];
        let response = manager(policies, FakeAuthorizer::allowing(&["bound"]))
            .review(&request())
            .await
            .unwrap();

        assert_eq!(denied_policies(&response), vec!["bound"]);
    }

    #[tokio::test]
    async fn test_denial_is_sorted_and_deterministic() {
        let policies = vec![cn_policy("charlie", "c"), cn_policy("alpha", "a"), cn_policy("bravo", "b")];
        let mgr = manager(policies, FakeAuthorizer::allowing(&["alpha", "bravo", "charlie"]));

        let response = mgr.review(&request()).await.unwrap();
        assert_eq!(denied_policies(&response), vec!["alpha", "bravo", "charlie"]);

        insta::assert_snapshot!(
            response.message(),
            @r#"No policy approved this request: [alpha: allowed_common_name: Invalid value: "test": a] [bravo: allowed_common_name: Invalid value: "test": b] [charlie: allowed_common_name: Invalid value: "test": c]"#
        );

        let reversed = manager(
            vec![cn_policy("bravo", "b"), cn_policy("alpha", "a"), cn_policy("charlie", "c")],
            FakeAuthorizer::allowing(&["alpha", "bravo", "charlie"]),
        );
        assert_eq!(reversed.review(&request()).await.unwrap().message(), response.message());
    }

    #[tokio::test]
    async fn test_every_evaluator_contributes_to_the_denial() {
        let registry = Registry::new()
            .with(Arc::new(FakeEvaluator::denied("extra", Violation::new("plugins.extra", "x", "y"))))
            .unwrap();
        let mgr = Manager::new(
            FakeLister::new(vec![cn_policy("p", "nope")]),
            FakeAuthorizer::allowing(&["p"]),
            Arc::new(registry),
        );

        let ReviewResponse::Denied { denials } = mgr.review(&request()).await.unwrap() else {
            panic!("expected a denial");
        };
        let evaluators: Vec<&str> = denials[0].evaluators.iter().map(|e| e.evaluator.as_str()).collect();
        assert_eq!(evaluators, vec!["attribute", "extra"]);
    }

    #[tokio::test]
    async fn test_additional_evaluator_only_narrows() {
        let registry = Registry::new()
            .with(Arc::new(FakeEvaluator::denied("extra", Violation::new("plugins.extra", "x", "y"))))
            .unwrap();
        let mgr = Manager::new(
            FakeLister::new(vec![ready_policy("open", PolicySpec::default())]),
            FakeAuthorizer::allowing(&["open"]),
            Arc::new(registry),
        );

        let response = mgr.review(&request()).await.unwrap();
        assert_eq!(denied_policies(&response), vec!["open"]);
    }

    #[tokio::test]
    async fn test_lister_error_aborts() {
        let mgr = Manager::new(FakeLister::failing(), FakeAuthorizer::allowing(&[]), Arc::new(Registry::new()));
        let err = mgr.review(&request()).await.unwrap_err();
        assert!(err.to_string().contains("could not list policies"));
    }

    #[tokio::test]
    async fn test_authorizer_error_aborts() {
        let authorizer = FakeAuthorizer::allowing(&["a"]).with_failure("b");
        let err = manager(vec![cn_policy("a", "*"), cn_policy("b", "*")], authorizer)
            .review(&request())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("could not determine bound policies"));
    }

    #[tokio::test]
    async fn test_evaluator_error_aborts() {
        let registry = Registry::new().with(Arc::new(FakeEvaluator::failing("broken"))).unwrap();
        let mgr = Manager::new(
            FakeLister::new(vec![ready_policy("p", PolicySpec::default())]),
            FakeAuthorizer::allowing(&["p"]),
            Arc::new(registry),
        );

        let err = mgr.review(&request()).await.unwrap_err();
        assert!(err.to_string().contains("evaluator 'broken' failed on policy 'p'"));
    }

    #[tokio::test]
    async fn test_attribute_scenario_denies_with_four_violations() {
        let policy = ready_policy(
            "strict",
            PolicySpec {
                allowed_common_name: Some("not-test".to_string()),
                allowed_is_ca: Some(false),
                min_duration: Some(Duration::from_hours(200)),
                allowed_dns_names: Some(vec!["not-foo.bar".to_string()]),
                ..PolicySpec::default()
            },
        );
        let request = SigningRequest {
            is_ca: true,
            duration: Some(Duration::from_hours(100)),
            dns_names: vec!["foo.bar".to_string(), "example.com".to_string()],
            ..request()
        };

        let ReviewResponse::Denied { denials } = manager(vec![policy], FakeAuthorizer::allowing(&["strict"]))
            .review(&request)
            .await
            .unwrap()
        else {
            panic!("expected a denial");
        };

        assert_eq!(denials.len(), 1);
        assert_eq!(denials[0].evaluators.len(), 1);
        assert_eq!(denials[0].evaluators[0].violations.len(), 4);
    }
}
