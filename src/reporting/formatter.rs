use serde::{Deserialize, Serialize};

use crate::errors::SondaError;
use crate::models::Report;

/// Output mode requested by the caller. Defaults to JSON on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

const RULE: &str = "------------------------------------------------------------";
const BANNER: &str = "============================================================";

/// Canonical JSON rendering of the report.
pub fn render_json(report: &Report) -> Result<String, SondaError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Plain-text rendering with a fixed section order. Pure and
/// order-preserving: the same report always yields byte-identical output.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(BANNER);
    out.push_str("\n SECURITY ASSESSMENT REPORT\n");
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(&format!("Target:    {}\n", report.target));
    out.push_str(&format!("Generated: {}\n", report.timestamp.to_rfc3339()));
    out.push_str(&format!("Engine:    {}\n", report.generated_by));

    section(&mut out, "SUMMARY");
    out.push_str(&report.summary);
    out.push('\n');
    out.push_str(&format!("\nRisk level: {}\n", report.risk_level.as_str()));
    out.push_str(&format!("Total findings: {}\n", report.total_findings));

    section(&mut out, "CRITICAL FINDINGS");
    if report.critical_findings.is_empty() {
        out.push_str("(none)\n");
    } else {
        for title in &report.critical_findings {
            out.push_str(&format!("- {}\n", title));
        }
    }

    section(&mut out, "DETAILED FINDINGS");
    if report.findings.is_empty() {
        out.push_str("(none)\n");
    } else {
        for (i, finding) in report.findings.iter().enumerate() {
            out.push_str(&format!("[{}] {}\n", i + 1, finding.title));
            out.push_str(&format!("    Severity: {}\n", finding.severity.as_str()));
            out.push_str(&format!("    {}\n", finding.description));
        }
    }

    section(&mut out, "RECOMMENDATIONS");
    if report.recommendations.is_empty() {
        out.push_str("(none)\n");
    } else {
        for (i, rec) in report.recommendations.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, rec));
        }
    }

    out
}

fn section(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(RULE);
    out.push_str("\n ");
    out.push_str(title);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
}
