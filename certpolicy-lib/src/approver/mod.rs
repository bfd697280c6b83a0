//! Evaluators that decide whether a request satisfies a policy
//!
//! An [`Evaluator`] checks a [`SigningRequest`](crate::api::SigningRequest) against a
//! single [`Policy`](crate::api::Policy) and answers with an [`EvaluationResponse`].
//! Evaluators never approve on their own: a policy approves a request only when
//! every evaluator held by the [`Registry`] returns [`EvaluationResponse::NotDenied`].
//! Adding an evaluator can therefore only narrow what gets approved.
//!
//! The [`AttributeEvaluator`] is always registered. It covers the constraints every
//! policy can express: common name, subject alternative names, duration, CA flag,
//! private key and issuer.
//!
//! Evaluators also take part in reconciliation through [`Evaluator::ready`], which
//! lets [`reconcile`] decide whether a policy is fit to take part in reviews.

mod attribute;
mod evaluation_response;
mod evaluator;
mod reconciler;
mod registry;
mod violation;
mod wildcard;

pub use attribute::{ATTRIBUTE_EVALUATOR_NAME, AttributeEvaluator};
pub use evaluation_response::EvaluationResponse;
pub use evaluator::Evaluator;
pub use reconciler::{ReadyResponse, reconcile};
pub use registry::Registry;
pub use violation::{Violation, aggregate_message};
pub use wildcard::{PATTERN_SIZE_LIMIT, WildcardPattern};
