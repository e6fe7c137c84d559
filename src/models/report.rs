use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::finding::{Finding, Severity};
use super::recon::ReconResult;

/// Report-level risk label, computed deterministically from the maximum
/// severity present across all findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Maps the worst finding severity to the report label: Critical/High
    /// findings mean High overall, Medium means Medium, anything else Low.
    pub fn from_findings(findings: &[Finding]) -> Self {
        let worst = findings.iter().map(|f| f.severity.rank()).min();
        match worst {
            Some(r) if r <= Severity::High.rank() => RiskLevel::High,
            Some(r) if r == Severity::Medium.rank() => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Aggregate of all battery checks for one scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityResult {
    pub findings: Vec<Finding>,
    /// Names of all checks that were executed.
    pub tests_run: Vec<String>,
    /// Names of checks that failed (transport error or vacuous input) and
    /// therefore contributed no findings.
    pub failed_checks: Vec<String>,
}

/// Narrative synthesis output. All fields are populated together: the
/// fallback path fills every field, so no consumer handles partial output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub summary: String,
    pub risk_level: RiskLevel,
    pub critical_findings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Raw collector and battery outputs, carried in the report for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalDetails {
    pub recon: ReconResult,
    pub vulnerabilities: VulnerabilityResult,
}

/// The final deliverable. Assembled once by the orchestrator, immutable,
/// serialized camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub target: String,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    /// Mechanically computed from finding severities; takes precedence over
    /// the AI's own risk opinion.
    pub risk_level: RiskLevel,
    pub total_findings: usize,
    pub findings: Vec<Finding>,
    pub critical_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub technical_details: TechnicalDetails,
    pub generated_by: String,
}
