//! The built-in evaluator for the base policy constraints

use super::{EvaluationResponse, Evaluator, ReadyResponse, Violation, WildcardPattern};
use crate::Result;
use crate::api::{KeyAlgorithm, Policy, PrivateKeyPolicy, SigningRequest};
use core::time::Duration;

/// Name under which the [`AttributeEvaluator`] is registered
pub const ATTRIBUTE_EVALUATOR_NAME: &str = "attribute";

/// Checks the request attributes every policy can constrain.
///
/// Violations are reported in a fixed order (common name, duration, DNS names, IP
/// addresses, URIs, issuer, CA flag, key algorithm, key size) so that identical
/// input always yields an identical message.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeEvaluator;

impl Evaluator for AttributeEvaluator {
    fn name(&self) -> &str {
        ATTRIBUTE_EVALUATOR_NAME
    }

    fn evaluate(&self, policy: &Policy, request: &SigningRequest) -> Result<EvaluationResponse> {
        let spec = &policy.spec;
        let mut violations = Vec::new();

        if let Some(allowed) = &spec.allowed_common_name
            && !WildcardPattern::new(allowed)?.matches(&request.common_name)
        {
            violations.push(Violation::new(
                "allowed_common_name",
                format!("{:?}", request.common_name),
                allowed.as_str(),
            ));
        }

        if let (Some(min), Some(requested)) = (spec.min_duration, request.duration)
            && requested < min
        {
            violations.push(Violation::new("min_duration", format_duration(requested), format_duration(min)));
        }

        check_sequence("allowed_dns_names", spec.allowed_dns_names.as_deref(), &request.dns_names, &mut violations)?;
        check_sequence(
            "allowed_ip_addresses",
            spec.allowed_ip_addresses.as_deref(),
            &request.ip_addresses,
            &mut violations,
        )?;
        check_sequence("allowed_uris", spec.allowed_uris.as_deref(), &request.uris, &mut violations)?;

        if let Some(allowed) = &spec.allowed_issuers {
            let mut matched = false;
            for pattern in allowed {
                if pattern.matches(&request.issuer_ref)? {
                    matched = true;
                    break;
                }
            }

            if !matched {
                violations.push(Violation::new(
                    "allowed_issuers",
                    request.issuer_ref.to_string(),
                    format_list(allowed.iter().map(ToString::to_string)),
                ));
            }
        }

        if let Some(allowed) = spec.allowed_is_ca
            && allowed != request.is_ca
        {
            violations.push(Violation::new("allowed_is_ca", request.is_ca.to_string(), allowed.to_string()));
        }

        if let Some(key) = &spec.allowed_private_key {
            check_private_key(key, request, &mut violations);
        }

        Ok(EvaluationResponse::from_violations(violations))
    }

    fn ready(&self, policy: &Policy) -> Result<ReadyResponse> {
        let spec = &policy.spec;
        let mut errors = Vec::new();

        let mut patterns: Vec<(&str, &str)> = Vec::new();
        if let Some(cn) = &spec.allowed_common_name {
            patterns.push(("allowed_common_name", cn.as_str()));
        }
        for (field, list) in [
            ("allowed_dns_names", &spec.allowed_dns_names),
            ("allowed_ip_addresses", &spec.allowed_ip_addresses),
            ("allowed_uris", &spec.allowed_uris),
        ] {
            patterns.extend(list.iter().flatten().map(|p| (field, p.as_str())));
        }
        for issuer in spec.allowed_issuers.iter().flatten() {
            patterns.extend(issuer.patterns().map(|p| ("allowed_issuers", p)));
        }
        patterns.extend(spec.issuer_ref_selector.patterns().map(|p| ("issuer_ref_selector", p)));

        for (field, pattern) in patterns {
            if let Err(e) = WildcardPattern::new(pattern) {
                errors.push(format!("{field}: {e}"));
            }
        }

        if let Some(key) = &spec.allowed_private_key {
            if let (Some(min), Some(max)) = (key.min_size, key.max_size)
                && min > max
            {
                errors.push(format!("allowed_private_key: min_size {min} is greater than max_size {max}"));
            }

            if key.allowed_algorithm == Some(KeyAlgorithm::Ed25519) && (key.min_size.is_some() || key.max_size.is_some()) {
                errors.push("allowed_private_key: size constraints cannot apply to Ed25519 keys".to_string());
            }
        }

        Ok(ReadyResponse::from_errors(errors))
    }
}

/// Every request value must match at least one allowed pattern
fn check_sequence(field: &str, allowed: Option<&[String]>, values: &[String], violations: &mut Vec<Violation>) -> Result<()> {
    let Some(allowed) = allowed else {
        return Ok(());
    };

    let patterns = WildcardPattern::compile_all(allowed)?;
    if !WildcardPattern::covers_all(&patterns, values) {
        violations.push(Violation::new(field, format!("{values:?}"), format_list(allowed.iter())));
    }

    Ok(())
}

fn check_private_key(key: &PrivateKeyPolicy, request: &SigningRequest, violations: &mut Vec<Violation>) {
    if let Some(allowed) = key.allowed_algorithm
        && allowed != request.key_algorithm
    {
        violations.push(Violation::new(
            "allowed_private_key.allowed_algorithm",
            request.key_algorithm.to_string(),
            allowed.to_string(),
        ));
    }

    if !request.key_algorithm.has_variable_size() {
        return;
    }

    let size = request.key_size.map_or_else(|| "<none>".to_string(), |s| s.to_string());

    if let Some(min) = key.min_size
        && request.key_size.is_none_or(|s| s < min)
    {
        violations.push(Violation::new("allowed_private_key.min_size", size.as_str(), min.to_string()));
    }

    if let Some(max) = key.max_size
        && request.key_size.is_none_or(|s| s > max)
    {
        violations.push(Violation::new("allowed_private_key.max_size", size.as_str(), max.to_string()));
    }
}

fn format_duration(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}

fn format_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<S> = items.into_iter().collect();
    let parts: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    format!("[{}]", parts.join(", "))
}
