use async_trait::async_trait;
use reqwest::Url;

use super::{Check, CheckContext};
use crate::errors::SondaError;
use crate::models::{Finding, Severity};

/// Headers validated against the collector's snapshot, with the severity of
/// their absence.
const VALIDATED_HEADERS: &[(&str, &str, Severity)] = &[
    (
        "content-security-policy",
        "Content-Security-Policy",
        Severity::Medium,
    ),
    (
        "strict-transport-security",
        "Strict-Transport-Security",
        Severity::Medium,
    ),
    ("x-frame-options", "X-Frame-Options", Severity::Medium),
    (
        "x-content-type-options",
        "X-Content-Type-Options",
        Severity::Low,
    ),
];

/// Flags tracked security headers that the target does not send. Reads the
/// collector's snapshot; makes no request of its own.
pub struct SecurityHeadersCheck;

#[async_trait]
impl Check for SecurityHeadersCheck {
    fn name(&self) -> &'static str {
        "security_headers"
    }

    async fn run(&self, _target: &Url, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, SondaError> {
        // A failed probe means an all-null snapshot; reporting four missing
        // headers from it would be noise, so the check fails instead.
        if ctx.recon.probe_failed() {
            return Err(SondaError::Network(
                "reconnaissance probe failed, header snapshot is empty".into(),
            ));
        }

        let mut findings = Vec::new();
        for (key, display, severity) in VALIDATED_HEADERS {
            let present = ctx
                .recon
                .security_headers
                .get(*key)
                .map(|v| v.is_some())
                .unwrap_or(false);
            if !present {
                findings.push(Finding::new(
                    format!("Missing {} header", display),
                    *severity,
                    format!(
                        "The response does not include the {} header, leaving the \
                         browser without the protection it provides.",
                        display
                    ),
                ));
            }
        }
        Ok(findings)
    }
}
