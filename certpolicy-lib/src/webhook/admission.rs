use crate::Result;
use crate::api::SigningRequest;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};

/// An inbound admission request for a signing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdmissionRequest {
    /// Identifier echoed back in the response
    pub uid: String,

    pub request: SigningRequest,
}

impl AdmissionRequest {
    /// Decode an admission request from its JSON form
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or does not describe a signing request
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).into_app_err("could not decode admission request")
    }
}

/// The verdict returned for an [`AdmissionRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResponse {
    pub uid: String,

    pub allowed: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AdmissionResponse {
    #[must_use]
    pub fn allowed(uid: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            allowed: true,
            message: message.into(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn denied(uid: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            allowed: false,
            message: message.into(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Encode the response as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).into_app_err("could not encode admission response")
    }
}
