//! Test doubles for the engine's collaborators

use crate::Result;
use crate::api::{Policy, PolicySpec, PolicyStatus, SigningRequest, UserInfo};
use crate::approver::{EvaluationResponse, Evaluator, ReadyResponse, Violation};
use crate::manager::{Authorizer, PolicyLister, ResourceAttributes};
use ohno::bail;
use std::sync::Mutex;

/// A policy that reconciliation has already marked as ready
pub fn ready_policy(name: &str, spec: PolicySpec) -> Policy {
    Policy::new(name, spec).with_status(PolicyStatus::ready())
}

#[derive(Debug, Clone)]
enum Verdict {
    NotDenied,
    Denied(Violation),
    Fail,
}

/// An evaluator with a canned verdict.
#[derive(Debug, Clone)]
pub struct FakeEvaluator {
    name: String,
    verdict: Verdict,
    ready_errors: Vec<String>,
}

impl FakeEvaluator {
    pub fn not_denied(name: &str) -> Self {
        Self {
            name: name.to_string(),
            verdict: Verdict::NotDenied,
            ready_errors: Vec::new(),
        }
    }

    pub fn denied(name: &str, violation: Violation) -> Self {
        Self {
            verdict: Verdict::Denied(violation),
            ..Self::not_denied(name)
        }
    }

    /// Fails both evaluation and readiness checks
    pub fn failing(name: &str) -> Self {
        Self {
            verdict: Verdict::Fail,
            ..Self::not_denied(name)
        }
    }

    pub fn with_ready_errors(mut self, errors: &[&str]) -> Self {
        self.ready_errors = errors.iter().map(ToString::to_string).collect();
        self
    }
}

impl Evaluator for FakeEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, _policy: &Policy, _request: &SigningRequest) -> Result<EvaluationResponse> {
        match &self.verdict {
            Verdict::NotDenied => Ok(EvaluationResponse::NotDenied),
            Verdict::Denied(violation) => Ok(EvaluationResponse::Denied(vec![violation.clone()])),
            Verdict::Fail => bail!("{} exploded", self.name),
        }
    }

    fn ready(&self, _policy: &Policy) -> Result<ReadyResponse> {
        if matches!(self.verdict, Verdict::Fail) {
            bail!("{} could not tell", self.name);
        }

        Ok(ReadyResponse::from_errors(self.ready_errors.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListerMode {
    Ready,
    Fail,
    Hang,
}

/// A lister over a fixed set of policies.
#[derive(Debug)]
pub struct FakeLister {
    policies: Vec<Policy>,
    mode: ListerMode,
}

impl FakeLister {
    pub const fn new(policies: Vec<Policy>) -> Self {
        Self {
            policies,
            mode: ListerMode::Ready,
        }
    }

    pub const fn failing() -> Self {
        Self {
            policies: Vec::new(),
            mode: ListerMode::Fail,
        }
    }

    /// A lister that never answers
    pub const fn pending() -> Self {
        Self {
            policies: Vec::new(),
            mode: ListerMode::Hang,
        }
    }
}

impl PolicyLister for FakeLister {
    async fn list(&self) -> Result<Vec<Policy>> {
        match self.mode {
            ListerMode::Ready => Ok(self.policies.clone()),
            ListerMode::Fail => bail!("policy store unavailable"),
            ListerMode::Hang => futures::future::pending().await,
        }
    }
}

/// An authorizer allowing a fixed set of policy names and recording every check.
#[derive(Debug, Default)]
pub struct FakeAuthorizer {
    allowed: Vec<String>,
    failures: Vec<String>,
    calls: Mutex<Vec<(UserInfo, ResourceAttributes)>>,
}

impl FakeAuthorizer {
    pub fn allowing(policies: &[&str]) -> Self {
        Self {
            allowed: policies.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Make checks against the named policy fail
    pub fn with_failure(mut self, policy: &str) -> Self {
        self.failures.push(policy.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(UserInfo, ResourceAttributes)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Authorizer for FakeAuthorizer {
    async fn check(&self, user: &UserInfo, resource: &ResourceAttributes) -> Result<bool> {
        self.calls.lock().unwrap().push((user.clone(), resource.clone()));

        if self.failures.contains(&resource.name) {
            bail!("authorization service unavailable");
        }

        Ok(self.allowed.contains(&resource.name))
    }
}
