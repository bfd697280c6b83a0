use super::{IssuerRef, KeyAlgorithm, UserInfo};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// A certificate signing request under review.
///
/// The request is decoded once from the admission payload and is not modified
/// during a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SigningRequest {
    #[serde(default)]
    pub common_name: String,

    #[serde(default)]
    pub dns_names: Vec<String>,

    #[serde(default)]
    pub ip_addresses: Vec<String>,

    #[serde(default)]
    pub uris: Vec<String>,

    /// Requested certificate lifetime; the issuer's default applies when absent
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,

    #[serde(default)]
    pub is_ca: bool,

    #[serde(default)]
    pub key_algorithm: KeyAlgorithm,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_size: Option<u32>,

    pub issuer_ref: IssuerRef,

    /// Namespace the request was created in
    #[serde(default)]
    pub namespace: String,

    /// The user that created the request
    #[serde(default)]
    pub user: UserInfo,
}
