pub mod fallback;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::SondaError;
use crate::llm::LlmProvider;
use crate::models::{AiAnalysis, ReconResult, RiskLevel, VulnerabilityResult};

pub use fallback::fallback_analysis;

/// Which path produced the analysis, for logging only. The report itself is
/// identical in shape on both paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisSource {
    Live,
    Fallback,
}

/// Produce the narrative analysis. The live provider is tried when present;
/// any failure (timeout, non-2xx, unparsable or incomplete output) degrades
/// to the deterministic fallback. Never fails, never returns partial fields.
pub async fn synthesize(
    provider: Option<&dyn LlmProvider>,
    recon: &ReconResult,
    vulnerabilities: &VulnerabilityResult,
) -> (AiAnalysis, SynthesisSource) {
    if let Some(llm) = provider {
        match synthesize_live(llm, recon, vulnerabilities).await {
            Ok(analysis) => {
                info!(provider = llm.provider_name(), model = llm.model_name(), "AI synthesis complete");
                return (analysis, SynthesisSource::Live);
            }
            Err(e) => {
                warn!(error = %e, "AI synthesis failed, using deterministic fallback");
            }
        }
    } else {
        info!("No AI backend configured, using deterministic fallback");
    }
    (fallback_analysis(&vulnerabilities.findings), SynthesisSource::Fallback)
}

async fn synthesize_live(
    llm: &dyn LlmProvider,
    recon: &ReconResult,
    vulnerabilities: &VulnerabilityResult,
) -> Result<AiAnalysis, SondaError> {
    let prompt = build_prompt(recon, vulnerabilities);
    let schema_hint = json!({
        "summary": "2-4 sentence executive summary",
        "riskLevel": "Critical|High|Medium|Low|Info",
        "criticalFindings": ["titles of the findings that matter most"],
        "recommendations": ["ordered remediation steps"]
    });
    let system = "You are a security analyst writing the executive section of a \
                  non-intrusive web assessment report. Be factual and concise; do \
                  not invent findings that are not in the input.";

    let value = llm.complete_structured(&prompt, &schema_hint, Some(system)).await?;
    parse_analysis(&value)
}

fn build_prompt(recon: &ReconResult, vulnerabilities: &VulnerabilityResult) -> String {
    let mut prompt = String::from("Synthesize this web security assessment.\n\n");

    prompt.push_str("## Technology stack\n");
    if recon.technologies.is_empty() {
        prompt.push_str("(none detected)\n");
    } else {
        for tech in &recon.technologies {
            prompt.push_str("- ");
            prompt.push_str(tech);
            prompt.push('\n');
        }
    }

    prompt.push_str("\n## Security header snapshot\n");
    for (name, value) in &recon.security_headers {
        match value {
            Some(v) => prompt.push_str(&format!("- {}: {}\n", name, v)),
            None => prompt.push_str(&format!("- {}: absent\n", name)),
        }
    }

    prompt.push_str("\n## Findings\n");
    if vulnerabilities.findings.is_empty() {
        prompt.push_str("(no findings)\n");
    } else {
        for finding in &vulnerabilities.findings {
            prompt.push_str(&format!(
                "- [{}] {}: {}\n",
                finding.severity.as_str(),
                finding.title,
                finding.description
            ));
        }
    }
    if !vulnerabilities.failed_checks.is_empty() {
        prompt.push_str(&format!(
            "\nChecks that could not run: {}\n",
            vulnerabilities.failed_checks.join(", ")
        ));
    }

    prompt.push_str(
        "\nProduce: an executive summary (2-4 sentences), a risk label, the subset \
         of findings you consider most critical (you may elevate based on combined \
         risk), and an ordered list of remediation recommendations.",
    );
    prompt
}

/// Validate and convert the model's JSON. Missing or empty fields are an
/// error so the caller degrades to the fallback instead of shipping a
/// half-filled analysis.
fn parse_analysis(value: &Value) -> Result<AiAnalysis, SondaError> {
    let summary = value["summary"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SondaError::LLMApi("Synthesis output missing summary".into()))?
        .to_string();

    let risk_label = value["riskLevel"]
        .as_str()
        .ok_or_else(|| SondaError::LLMApi("Synthesis output missing riskLevel".into()))?;
    let risk_level = match risk_label.to_ascii_lowercase().as_str() {
        "critical" | "high" => RiskLevel::High,
        "medium" => RiskLevel::Medium,
        "low" | "info" => RiskLevel::Low,
        other => {
            return Err(SondaError::LLMApi(format!(
                "Synthesis output has unknown risk label '{}'",
                other
            )))
        }
    };

    let critical_findings = string_array(&value["criticalFindings"]);
    let recommendations = string_array(&value["recommendations"]);
    if recommendations.is_empty() {
        return Err(SondaError::LLMApi(
            "Synthesis output has no recommendations".into(),
        ));
    }

    Ok(AiAnalysis {
        summary,
        risk_level,
        critical_findings,
        recommendations,
    })
}

fn string_array(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}
