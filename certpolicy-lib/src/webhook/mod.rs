//! The validation boundary between the admission wire format and the engine
//!
//! An [`AdmissionRequest`] carries a signing request as JSON. The [`Validator`]
//! runs it through a [`Manager`](crate::manager::Manager) under a time limit and
//! maps the decision onto an [`AdmissionResponse`]:
//!
//! - approved requests are allowed,
//! - denied requests are refused with the denial message,
//! - requests no policy applies to are allowed with a warning, or refused when the
//!   boundary is configured to treat them as denials,
//! - failures are refused with a fixed internal error message, so that callers can tell
//!   them apart from policy denials.

mod admission;
mod validator;

pub use admission::{AdmissionRequest, AdmissionResponse};
pub use validator::{INTERNAL_ERROR_MESSAGE, UnprocessedAction, Validator};
