use crate::api::UserInfo;
use serde::{Deserialize, Serialize};

/// Grants users and groups the right to use policies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Binding {
    /// Wildcard pattern over the names of the policies this binding grants
    pub policy: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Namespaces requests must come from; empty means any namespace
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
}

impl Binding {
    /// Whether the binding names `user` directly or through one of its groups
    #[must_use]
    pub fn has_subject(&self, user: &UserInfo) -> bool {
        self.users.contains(&user.username) || self.groups.iter().any(|g| user.in_group(g))
    }

    #[must_use]
    pub fn covers_namespace(&self, namespace: &str) -> bool {
        self.namespaces.is_empty() || self.namespaces.iter().any(|n| n == namespace)
    }
}
