use crate::Result;
use crate::api::UserInfo;

/// API group that policies belong to
pub const POLICY_API_GROUP: &str = "policy.certpolicy.io";

/// Resource name of policies in authorization checks
pub const POLICY_RESOURCE: &str = "certificaterequestpolicies";

/// Verb a requester needs on a policy for it to apply to their requests
pub const USE_VERB: &str = "use";

/// The resource an authorization check is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAttributes {
    pub group: String,
    pub resource: String,
    pub name: String,
    pub namespace: String,
    pub verb: String,
}

impl ResourceAttributes {
    /// Attributes asking whether a user may `use` the named policy from `namespace`
    #[must_use]
    pub fn use_policy(policy: &str, namespace: &str) -> Self {
        Self {
            group: POLICY_API_GROUP.to_string(),
            resource: POLICY_RESOURCE.to_string(),
            name: policy.to_string(),
            namespace: namespace.to_string(),
            verb: USE_VERB.to_string(),
        }
    }
}

/// Answers whether an identity may perform an action on a resource.
///
/// Typically backed by a remote authorization service, so calls can be slow or fail.
/// Checks must not change any state the engine depends on.
pub trait Authorizer: Send + Sync {
    fn check(&self, user: &UserInfo, resource: &ResourceAttributes) -> impl Future<Output = Result<bool>> + Send;
}
