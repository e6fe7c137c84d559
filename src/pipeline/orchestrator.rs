use chrono::Utc;
use reqwest::Url;
use tracing::{info, warn};
use uuid::Uuid;

use crate::checks;
use crate::config::ScannerConfig;
use crate::errors::SondaError;
use crate::llm::{self, LlmProvider};
use crate::models::{Report, RiskLevel, TechnicalDetails};
use crate::recon;
use crate::synthesis;

/// Generator tag stamped on every completed report.
pub const GENERATOR_TAG: &str = concat!("sonda v", env!("CARGO_PKG_VERSION"));

/// Validate and normalize the target URL. Absolute http/https with a host is
/// required; anything else fails here, before any network activity.
pub fn validate_target(raw: &str) -> Result<Url, SondaError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| SondaError::InvalidTarget(format!("'{}' is not a valid URL: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(SondaError::InvalidTarget(format!(
                "Unsupported scheme '{}': only http and https targets are scanned",
                other
            )))
        }
    }
    if url.host_str().is_none() {
        return Err(SondaError::InvalidTarget(format!(
            "'{}' has no host component",
            raw
        )));
    }
    Ok(url)
}

/// Run the full scan-and-synthesize pipeline for one target.
///
/// Sequence: validate, collect, run the battery (always, even when the
/// collector probe failed — several checks probe on their own), compute the
/// mechanical risk level, synthesize the narrative, assemble the report.
/// Only input validation and internal defects abort; every other failure
/// degrades the affected sub-result.
pub async fn run_scan(raw_url: &str, config: &ScannerConfig) -> Result<Report, SondaError> {
    let target = validate_target(raw_url)?;
    let scan_id = Uuid::new_v4().to_string();
    info!(scan_id = %scan_id, target = %target, "Scan started");

    let client = recon::build_probe_client(config)?;

    let recon_result = recon::collect(&client, &target).await;
    let vuln_result = checks::run_battery(&client, &target, &recon_result).await;
    info!(
        scan_id = %scan_id,
        findings = vuln_result.findings.len(),
        failed_checks = vuln_result.failed_checks.len(),
        "Battery complete"
    );

    // Mechanical risk computation stays independent of the AI narrative so
    // the canonical label is auditable.
    let risk_level = RiskLevel::from_findings(&vuln_result.findings);

    let provider = llm::create_provider(config);
    let provider_ref = provider.as_ref().map(|p| p as &dyn LlmProvider);
    let (analysis, source) = synthesis::synthesize(provider_ref, &recon_result, &vuln_result).await;
    if analysis.risk_level != risk_level {
        warn!(
            scan_id = %scan_id,
            computed = risk_level.as_str(),
            ai_opinion = analysis.risk_level.as_str(),
            "AI risk opinion differs from computed risk level; computed label is canonical"
        );
    }

    let findings = vuln_result.findings.clone();
    let report = Report {
        target: target.to_string(),
        timestamp: Utc::now(),
        summary: analysis.summary,
        risk_level,
        total_findings: findings.len(),
        findings,
        critical_findings: analysis.critical_findings,
        recommendations: analysis.recommendations,
        technical_details: TechnicalDetails {
            recon: recon_result,
            vulnerabilities: vuln_result,
        },
        generated_by: GENERATOR_TAG.to_string(),
    };

    info!(
        scan_id = %scan_id,
        risk = report.risk_level.as_str(),
        findings = report.total_findings,
        synthesis = ?source,
        "Scan complete"
    );
    Ok(report)
}
