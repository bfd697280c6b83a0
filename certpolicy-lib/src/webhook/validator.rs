use super::{AdmissionRequest, AdmissionResponse};
use crate::Result;
use crate::approver::ATTRIBUTE_EVALUATOR_NAME;
use crate::manager::{Authorizer, Manager, PolicyLister, ReviewResponse};
use core::time::Duration;
use ohno::bail;
use serde::{Deserialize, Serialize};
use strum::Display;

const LOG_TARGET: &str = " validator";

/// Message returned when a review could not reach a decision
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error: the request could not be reviewed";

/// How to answer a request that no policy applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UnprocessedAction {
    /// Let the request through with a warning
    #[default]
    Allow,

    /// Refuse the request
    Deny,
}

/// Answers admission requests using a [`Manager`].
#[derive(Debug)]
pub struct Validator<L, A> {
    manager: Manager<L, A>,
    timeout: Duration,
    on_unprocessed: UnprocessedAction,
}

impl<L: PolicyLister, A: Authorizer> Validator<L, A> {
    #[must_use]
    pub const fn new(manager: Manager<L, A>, timeout: Duration, on_unprocessed: UnprocessedAction) -> Self {
        Self {
            manager,
            timeout,
            on_unprocessed,
        }
    }

    /// Review the signing request carried by `admission`.
    ///
    /// This never fails: errors and timeouts are logged and turned into a refusal
    /// carrying [`INTERNAL_ERROR_MESSAGE`].
    pub async fn handle(&self, admission: &AdmissionRequest) -> AdmissionResponse {
        let uid = admission.uid.as_str();

        let review = match tokio::time::timeout(self.timeout, self.manager.review(&admission.request)).await {
            Ok(Ok(review)) => review,
            Ok(Err(e)) => {
                log::error!(target: LOG_TARGET, "Could not review request '{uid}': {e:#}");
                return AdmissionResponse::denied(uid, INTERNAL_ERROR_MESSAGE);
            }
            Err(_) => {
                log::error!(target: LOG_TARGET, "Review of request '{uid}' did not complete within {}", humantime::format_duration(self.timeout));
                return AdmissionResponse::denied(uid, INTERNAL_ERROR_MESSAGE);
            }
        };

        let message = review.message();
        match review {
            ReviewResponse::Approved { .. } => AdmissionResponse::allowed(uid, message),
            ReviewResponse::Denied { .. } => AdmissionResponse::denied(uid, message),
            ReviewResponse::Unprocessed { .. } => match self.on_unprocessed {
                UnprocessedAction::Allow => AdmissionResponse::allowed(uid, "").with_warning(message),
                UnprocessedAction::Deny => AdmissionResponse::denied(uid, message),
            },
        }
    }

    /// Readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error until the built-in attribute evaluator is registered
    pub fn check(&self) -> Result<()> {
        if !self.manager.registry().contains(ATTRIBUTE_EVALUATOR_NAME) {
            bail!("the '{ATTRIBUTE_EVALUATOR_NAME}' evaluator is not registered");
        }

        Ok(())
    }
}
