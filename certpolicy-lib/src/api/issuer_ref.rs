use crate::Result;
use crate::approver::WildcardPattern;
use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Deserialize, Serialize};

/// Identifies the issuing authority that would sign a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IssuerRef {
    pub name: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub group: String,
}

impl IssuerRef {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            group: group.into(),
        }
    }
}

impl Display for IssuerRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{{} {} {}}}", self.name, self.kind, self.group)
    }
}

/// Wildcard patterns over the components of an [`IssuerRef`].
///
/// An unset or empty component matches any value. Used both for selecting the policies that
/// apply to a request and for the allow-list of issuers a policy accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssuerRefPattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl IssuerRefPattern {
    #[must_use]
    pub fn new(name: Option<&str>, kind: Option<&str>, group: Option<&str>) -> Self {
        Self {
            name: name.map(ToString::to_string),
            kind: kind.map(ToString::to_string),
            group: group.map(ToString::to_string),
        }
    }

    /// Check whether every set component matches the corresponding part of `issuer`
    ///
    /// # Errors
    ///
    /// Returns an error if one of the patterns cannot be compiled
    pub fn matches(&self, issuer: &IssuerRef) -> Result<bool> {
        for (pattern, value) in [(&self.name, &issuer.name), (&self.kind, &issuer.kind), (&self.group, &issuer.group)] {
            if let Some(pattern) = component(pattern.as_deref())
                && !WildcardPattern::new(pattern)?.matches(value)
            {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// The patterns that are set, for validation purposes
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        [&self.name, &self.kind, &self.group].into_iter().filter_map(|p| component(p.as_deref()))
    }
}

impl Display for IssuerRefPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{{{} {} {}}}",
            component(self.name.as_deref()).unwrap_or("*"),
            component(self.kind.as_deref()).unwrap_or("*"),
            component(self.group.as_deref()).unwrap_or("*")
        )
    }
}

/// The pattern of a component, if it constrains anything
fn component(pattern: Option<&str>) -> Option<&str> {
    pattern.filter(|p| !p.is_empty())
}
