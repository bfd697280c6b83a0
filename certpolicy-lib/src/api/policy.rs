use super::{IssuerRefPattern, KeyAlgorithm};
use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named rule set constraining which signing requests are acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Policy {
    pub name: String,

    #[serde(default)]
    pub spec: PolicySpec,

    /// Set by reconciliation, never by the policy author
    #[serde(default)]
    pub status: PolicyStatus,
}

impl Policy {
    /// Create a policy that has not been reconciled yet
    #[must_use]
    pub fn new(name: impl Into<String>, spec: PolicySpec) -> Self {
        Self {
            name: name.into(),
            spec,
            status: PolicyStatus::default(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }
}

/// The constraints of a policy.
///
/// Every `allowed_*` field is optional: an unset field places no constraint on the
/// corresponding request attribute. String values are wildcard patterns where `*`
/// matches any run of characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_common_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_dns_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_ip_addresses: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_uris: Option<Vec<String>>,

    /// Shortest certificate lifetime a request may ask for
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_is_ca: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_private_key: Option<PrivateKeyPolicy>,

    /// Issuers the request may target; at least one entry must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_issuers: Option<Vec<IssuerRefPattern>>,

    /// Decides whether the policy applies to a request at all
    #[serde(default)]
    pub issuer_ref_selector: IssuerRefPattern,

    /// Configuration for additional evaluators, keyed by evaluator name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugins: BTreeMap<String, PluginConfig>,
}

/// Constraints on the private key of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrivateKeyPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_algorithm: Option<KeyAlgorithm>,

    /// Smallest key size, in bits for RSA or curve size for ECDSA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
}

/// Settings handed to a named evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

/// Readiness of a policy as determined by reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyStatus {
    #[serde(default)]
    pub ready: bool,

    /// Why the policy is not ready
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

impl PolicyStatus {
    #[must_use]
    pub const fn ready() -> Self {
        Self {
            ready: true,
            reasons: Vec::new(),
        }
    }

    #[must_use]
    pub const fn not_ready(reasons: Vec<String>) -> Self {
        Self { ready: false, reasons }
    }
}
