use crate::Result;
use crate::api::Policy;

/// Source of the policies known to the system.
///
/// Implementations must return the full current set; there is no pagination.
pub trait PolicyLister: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<Policy>>> + Send;
}
