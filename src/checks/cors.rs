use async_trait::async_trait;
use reqwest::Url;

use super::{Check, CheckContext};
use crate::errors::SondaError;
use crate::models::{Finding, Severity};

/// Arbitrary attacker-controlled origin sent on the probe. Any server that
/// echoes it back accepts cross-origin requests from anywhere.
const ATTACKER_ORIGIN: &str = "https://attacker.invalid";

/// Probes the target's CORS policy with a foreign `Origin` header.
pub struct CorsCheck;

#[async_trait]
impl Check for CorsCheck {
    fn name(&self) -> &'static str {
        "cors"
    }

    async fn run(&self, target: &Url, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, SondaError> {
        let response = ctx
            .client
            .get(target.clone())
            .header("Origin", ATTACKER_ORIGIN)
            .send()
            .await
            .map_err(|e| SondaError::Network(format!("CORS probe failed: {}", e)))?;

        let allow_origin = response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let allow_credentials = response
            .headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let mut findings = Vec::new();
        match allow_origin.as_deref() {
            Some("*") if allow_credentials => {
                findings.push(Finding::new(
                    "Exploitable CORS configuration",
                    Severity::High,
                    "Access-Control-Allow-Origin is a wildcard while \
                     Access-Control-Allow-Credentials is true; any origin can issue \
                     credentialed cross-origin requests and read the responses.",
                ));
            }
            Some(origin) if origin == ATTACKER_ORIGIN => {
                findings.push(Finding::new(
                    "Exploitable CORS configuration",
                    Severity::High,
                    "The server reflects an arbitrary Origin header back in \
                     Access-Control-Allow-Origin, granting cross-origin read access \
                     to any site that asks for it.",
                ));
            }
            Some("*") => {
                findings.push(Finding::new(
                    "Permissive CORS policy",
                    Severity::Low,
                    "Access-Control-Allow-Origin is a wildcard without credentials. \
                     Public data is readable cross-origin; review whether that is \
                     intended for this endpoint.",
                ));
            }
            _ => {}
        }
        Ok(findings)
    }
}
