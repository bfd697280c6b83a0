//! Turns "all policies" into one decision for one request
//!
//! # Implementation Model
//!
//! A review runs in four steps:
//!
//! 1. List every policy through the [`PolicyLister`]. No policies at all yields
//!    [`ReviewResponse::Unprocessed`].
//! 2. Narrow the list with the selection predicates: readiness, then the issuer
//!    reference selector, then RBAC binding through the [`Authorizer`]. The cheap
//!    local filters run first because the RBAC filter costs one authorization round
//!    trip per remaining policy. An empty result again yields `Unprocessed`.
//! 3. Run every registered evaluator against each remaining policy, in listing order.
//!    The first policy that no evaluator denies approves the request.
//! 4. Otherwise the request is denied, and the denial explains every policy that was
//!    consulted, sorted by policy name.
//!
//! Any collaborator or evaluator error aborts the review; partial decisions are
//! never returned.

mod authorizer;
mod lister;
mod predicate;
mod review;
mod review_response;

pub use authorizer::{Authorizer, POLICY_API_GROUP, POLICY_RESOURCE, ResourceAttributes, USE_VERB};
pub use lister::PolicyLister;
pub use predicate::{LOCAL_PREDICATES, Predicate, issuer_ref_selector, rbac_bound, ready};
pub use review::Manager;
pub use review_response::{EvaluatorDenial, PolicyDenial, ReviewResponse, UnprocessedReason};
