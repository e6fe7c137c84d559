pub mod cookies;
pub mod cors;
pub mod headers;
pub mod reflection;
pub mod sqli;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, Url};
use tracing::{info, warn};

use crate::errors::SondaError;
use crate::models::{Finding, ReconResult, VulnerabilityResult};

/// Shared read-only context handed to every check.
pub struct CheckContext<'a> {
    pub client: &'a Client,
    pub recon: &'a ReconResult,
}

/// One independent passive check. Checks catch their own transport errors:
/// an `Err` here means the check contributed nothing and is recorded in the
/// battery's failure list, never that the battery aborts.
#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self, target: &Url, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, SondaError>;
}

/// The registered battery. New checks are added here without touching the
/// orchestrator.
pub fn default_battery() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(headers::SecurityHeadersCheck),
        Box::new(cors::CorsCheck),
        Box::new(reflection::ReflectionCheck::default()),
        Box::new(sqli::SqlErrorCheck),
        Box::new(cookies::CookieSecurityCheck),
    ]
}

/// Run every registered check concurrently and accumulate findings in
/// registration order. A failed check appends no findings; its name goes to
/// `failed_checks` and the siblings are unaffected.
pub async fn run_battery(client: &Client, target: &Url, recon: &ReconResult) -> VulnerabilityResult {
    let checks = default_battery();
    let ctx = CheckContext { client, recon };

    let futures = checks.iter().map(|check| {
        let ctx = &ctx;
        async move { (check.name(), check.run(target, ctx).await) }
    });
    let outcomes = join_all(futures).await;

    let mut result = VulnerabilityResult::default();
    for (name, outcome) in outcomes {
        result.tests_run.push(name.to_string());
        match outcome {
            Ok(findings) => {
                info!(check = name, findings = findings.len(), "Check complete");
                result.findings.extend(findings);
            }
            Err(e) => {
                warn!(check = name, error = %e, "Check failed");
                result.failed_checks.push(name.to_string());
            }
        }
    }
    result
}
