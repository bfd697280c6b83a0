//! Filters that narrow the policies applicable to a request
//!
//! Every predicate returns a subset of its input in the original order; none of them
//! ever adds a policy.

use super::{Authorizer, ResourceAttributes};
use crate::Result;
use crate::api::{Policy, SigningRequest};
use futures::future::try_join_all;
use ohno::EnrichableExt;

/// A local, synchronous selection predicate
pub type Predicate = fn(&SigningRequest, Vec<Policy>) -> Result<Vec<Policy>>;

/// The local predicates in the order the manager applies them, keyed by name for logging
pub const LOCAL_PREDICATES: [(&str, Predicate); 2] = [("ready", ready), ("issuer_ref_selector", issuer_ref_selector)];

/// Keep the policies reconciliation has marked as ready.
///
/// A policy that was never reconciled, or failed reconciliation, is dropped.
pub fn ready(_request: &SigningRequest, policies: Vec<Policy>) -> Result<Vec<Policy>> {
    Ok(policies.into_iter().filter(|p| p.status.ready).collect())
}

/// Keep the policies whose issuer reference selector matches the request's issuer.
///
/// # Errors
///
/// Returns an error if a selector pattern cannot be compiled
pub fn issuer_ref_selector(request: &SigningRequest, policies: Vec<Policy>) -> Result<Vec<Policy>> {
    let mut matching = Vec::with_capacity(policies.len());
    for policy in policies {
        if policy.spec.issuer_ref_selector.matches(&request.issuer_ref)? {
            matching.push(policy);
        }
    }

    Ok(matching)
}

/// Keep the policies the requester is allowed to `use`.
///
/// One authorization check is issued per policy; the checks run concurrently and the
/// first failure aborts the whole filter. A check that answers "not allowed" simply
/// drops the policy.
///
/// # Errors
///
/// Returns an error if any authorization check fails
pub async fn rbac_bound<A: Authorizer>(authorizer: &A, request: &SigningRequest, policies: Vec<Policy>) -> Result<Vec<Policy>> {
    let checks = policies.iter().map(|policy| {
        let resource = ResourceAttributes::use_policy(&policy.name, &request.namespace);
        async move {
            authorizer.check(&request.user, &resource).await.map_err(|e| {
                e.enrich(format!(
                    "could not check whether '{}' may use policy '{}'",
                    request.user.username, resource.name
                ))
            })
        }
    });

    let allowed = try_join_all(checks).await?;

    Ok(policies
        .into_iter()
        .zip(allowed)
        .filter_map(|(policy, allowed)| allowed.then_some(policy))
        .collect())
}
