//! Collaborators backed by the configuration file
//!
//! In a cluster, policies come from a watched resource store and authorization
//! checks go to the cluster's RBAC service. Outside of one, [`PolicyStore`] serves the
//! policies listed in the configuration and [`StaticAuthorizer`] answers `use` checks
//! from the configured [`Binding`]s.

mod binding;
mod policy_store;
mod static_authorizer;

pub use binding::Binding;
pub use policy_store::PolicyStore;
pub use static_authorizer::StaticAuthorizer;
