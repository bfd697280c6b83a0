use super::{Violation, aggregate_message};

/// The verdict of one evaluator on one policy for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationResponse {
    /// The request satisfies every constraint this evaluator checks
    NotDenied,

    /// The request violates at least one constraint; never empty
    Denied(Vec<Violation>),
}

impl EvaluationResponse {
    /// Build a response from collected violations, denying only if there are any
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self::NotDenied
        } else {
            Self::Denied(violations)
        }
    }

    #[must_use]
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::NotDenied => &[],
            Self::Denied(violations) => violations,
        }
    }

    /// Human-readable message; empty when not denied
    #[must_use]
    pub fn message(&self) -> String {
        aggregate_message(self.violations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_violations() {
        assert_eq!(EvaluationResponse::from_violations(Vec::new()), EvaluationResponse::NotDenied);

        let response = EvaluationResponse::from_violations(vec![Violation::new("f", "v", "a")]);
        assert!(response.is_denied());
        assert_eq!(response.violations().len(), 1);
        assert_eq!(response.message(), "f: Invalid value: v: a");
    }

    #[test]
    fn test_not_denied_has_empty_message() {
        assert!(!EvaluationResponse::NotDenied.is_denied());
        assert!(EvaluationResponse::NotDenied.message().is_empty());
    }
}
