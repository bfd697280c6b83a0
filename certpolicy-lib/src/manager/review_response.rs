use crate::approver::{Violation, aggregate_message};
use core::fmt::{Display, Formatter, Result as FmtResult};
use strum::Display as StrumDisplay;

/// The final decision of a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewResponse {
    /// A policy accepted the request
    Approved { policy: String },

    /// Every applicable policy denied the request; sorted by policy name
    Denied { denials: Vec<PolicyDenial> },

    /// No policy applied to the request, which is not a denial
    Unprocessed { reason: UnprocessedReason },
}

impl ReviewResponse {
    /// Human-readable explanation of the decision
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Approved { policy } => format!("Approved by policy: {policy:?}"),
            Self::Denied { denials } => {
                let parts: Vec<String> = denials.iter().map(|d| format!("[{d}]")).collect();
                format!("No policy approved this request: {}", parts.join(" "))
            }
            Self::Unprocessed { reason } => reason.to_string(),
        }
    }
}

/// Why a review ended without any policy to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum UnprocessedReason {
    #[strum(serialize = "No policies exist")]
    NoPolicies,

    #[strum(serialize = "No policies bound or applicable")]
    NoneApplicable,
}

/// Why a single policy did not approve a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDenial {
    pub policy: String,

    /// One entry per denying evaluator, in registration order
    pub evaluators: Vec<EvaluatorDenial>,
}

impl PolicyDenial {
    #[must_use]
    pub const fn new(policy: String, evaluators: Vec<EvaluatorDenial>) -> Self {
        Self { policy, evaluators }
    }
}

impl Display for PolicyDenial {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let messages: Vec<String> = self.evaluators.iter().map(|e| aggregate_message(&e.violations)).collect();
        write!(f, "{}: {}", self.policy, messages.join(", "))
    }
}

/// The violations one evaluator found for one policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorDenial {
    pub evaluator: String,
    pub violations: Vec<Violation>,
}

impl EvaluatorDenial {
    #[must_use]
    pub fn new(evaluator: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            evaluator: evaluator.into(),
            violations,
        }
    }
}
