use super::{EvaluationResponse, ReadyResponse};
use crate::Result;
use crate::api::{Policy, SigningRequest};
use core::fmt::Debug;

/// A rule-checker contributing to the approval decision.
///
/// Evaluators are pure functions of `(policy, request)`: they hold no per-request
/// state and may be called concurrently from many reviews.
pub trait Evaluator: Debug + Send + Sync {
    /// Unique name of the evaluator, also the key under which policies configure it
    fn name(&self) -> &str;

    /// Check `request` against the constraints of `policy` that this evaluator owns
    ///
    /// Every violated constraint is reported, not just the first one.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluator cannot reach a verdict, which aborts the review
    fn evaluate(&self, policy: &Policy, request: &SigningRequest) -> Result<EvaluationResponse>;

    /// Check whether `policy` is well-formed as far as this evaluator is concerned
    ///
    /// # Errors
    ///
    /// Returns an error if readiness cannot be determined
    fn ready(&self, _policy: &Policy) -> Result<ReadyResponse> {
        Ok(ReadyResponse::ready())
    }
}
