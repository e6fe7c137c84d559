use async_trait::async_trait;
use rand::Rng;
use reqwest::Url;

use super::{Check, CheckContext};
use crate::errors::SondaError;
use crate::models::{Finding, Severity};

/// Requests the page with a unique marker in a query parameter and looks for
/// the marker echoed back unescaped. An unescaped echo is an indicator of a
/// reflected-XSS weakness, not proof of exploitability.
#[derive(Default)]
pub struct ReflectionCheck {
    /// Overrides random marker generation; tests pin the marker so a mocked
    /// target can echo it.
    marker: Option<String>,
}

impl ReflectionCheck {
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self { marker: Some(marker.into()) }
    }
}

/// The marker carries HTML-special characters so that output encoding
/// changes it: an escaped echo no longer contains the exact marker string.
fn make_marker() -> String {
    let token: u64 = rand::thread_rng().gen();
    format!("sonda{:016x}\"'><", token)
}

#[async_trait]
impl Check for ReflectionCheck {
    fn name(&self) -> &'static str {
        "reflection"
    }

    async fn run(&self, target: &Url, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, SondaError> {
        let marker = self.marker.clone().unwrap_or_else(make_marker);
        let mut probe_url = target.clone();
        probe_url.query_pairs_mut().append_pair("q", &marker);

        let response = ctx
            .client
            .get(probe_url)
            .send()
            .await
            .map_err(|e| SondaError::Network(format!("Reflection probe failed: {}", e)))?;
        let body = response
            .text()
            .await
            .map_err(|e| SondaError::Network(format!("Reflection probe body read failed: {}", e)))?;

        let mut findings = Vec::new();
        if body.contains(&marker) {
            findings.push(Finding::new(
                "Reflected input (XSS indicator)",
                Severity::High,
                "A unique marker submitted as a query parameter was echoed back in \
                 the response body without HTML escaping. This is an indicator of a \
                 reflected cross-site-scripting weakness, not proof of \
                 exploitability; manual verification is required.",
            ));
        }
        Ok(findings)
    }
}
