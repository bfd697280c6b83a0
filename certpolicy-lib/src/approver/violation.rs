use core::fmt::{Display, Formatter, Result as FmtResult};

/// A single constraint a request failed to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path of the policy field holding the constraint
    pub field: String,

    /// The offending request value, rendered for display
    pub value: String,

    /// The allowed value or pattern, rendered for display
    pub allowed: String,
}

impl Violation {
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<String>, allowed: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            allowed: allowed.into(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: Invalid value: {}: {}", self.field, self.value, self.allowed)
    }
}

/// Join violations into one message.
///
/// A single violation is shown on its own; several are shown as a bracketed,
/// comma-separated list in their original order.
#[must_use]
pub fn aggregate_message(violations: &[Violation]) -> String {
    match violations {
        [] => String::new(),
        [single] => single.to_string(),
        many => {
            let parts: Vec<String> = many.iter().map(ToString::to_string).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}
