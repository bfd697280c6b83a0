//! Domain types shared by the approval engine
//!
//! A [`SigningRequest`] is the certificate request under review, decoded from the
//! admission payload. A [`Policy`] is a named rule set that constrains which
//! requests are acceptable; its [`PolicyStatus`] is owned by reconciliation and
//! decides whether the policy takes part in reviews at all.

mod identity;
mod issuer_ref;
mod key_algorithm;
mod policy;
mod signing_request;

pub use identity::UserInfo;
pub use issuer_ref::{IssuerRef, IssuerRefPattern};
pub use key_algorithm::KeyAlgorithm;
pub use policy::{PluginConfig, Policy, PolicySpec, PolicyStatus, PrivateKeyPolicy};
pub use signing_request::SigningRequest;
