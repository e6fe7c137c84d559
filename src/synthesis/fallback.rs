use crate::models::{AiAnalysis, Finding, RiskLevel, Severity};

/// Static remediation lookup keyed by finding title. Cookie findings carry
/// the cookie name in the title, so those keys match on a stable fragment.
const RECOMMENDATIONS: &[(&str, &str)] = &[
    (
        "Missing Content-Security-Policy header",
        "Define a Content-Security-Policy that restricts script and object sources to trusted origins.",
    ),
    (
        "Missing Strict-Transport-Security header",
        "Send Strict-Transport-Security with a max-age of at least one year to enforce HTTPS.",
    ),
    (
        "Missing X-Frame-Options header",
        "Send X-Frame-Options: DENY (or a frame-ancestors CSP directive) to prevent clickjacking.",
    ),
    (
        "Missing X-Content-Type-Options header",
        "Send X-Content-Type-Options: nosniff to disable MIME type sniffing.",
    ),
    (
        "Exploitable CORS configuration",
        "Restrict Access-Control-Allow-Origin to an explicit allowlist and never combine a wildcard or reflected origin with credentials.",
    ),
    (
        "Permissive CORS policy",
        "Replace the wildcard Access-Control-Allow-Origin with an explicit origin allowlist.",
    ),
    (
        "Reflected input (XSS indicator)",
        "HTML-encode all user-supplied values on output and deploy a restrictive Content-Security-Policy.",
    ),
    (
        "SQL error message disclosure",
        "Use parameterized queries for all database access and return generic error pages to clients.",
    ),
    ("missing HttpOnly flag", "Set the HttpOnly flag on session cookies."),
    ("missing Secure flag", "Set the Secure flag so cookies are only sent over HTTPS."),
    (
        "missing or weak SameSite attribute",
        "Set SameSite=Lax or SameSite=Strict on cookies; SameSite=None requires the Secure flag.",
    ),
];

fn recommendation_for(title: &str) -> Option<&'static str> {
    RECOMMENDATIONS
        .iter()
        .find(|(key, _)| title == *key || title.contains(key))
        .map(|(_, rec)| *rec)
}

fn count_by(findings: &[Finding], severity: Severity) -> usize {
    findings.iter().filter(|f| f.severity == severity).count()
}

/// Deterministic synthesis used when the AI backend is unavailable or
/// returns unusable output. Every field is populated; no consumer ever sees
/// a partial analysis.
pub fn fallback_analysis(findings: &[Finding]) -> AiAnalysis {
    let critical = count_by(findings, Severity::Critical);
    let high = count_by(findings, Severity::High);
    let medium = count_by(findings, Severity::Medium);
    let low = count_by(findings, Severity::Low);
    let risk_level = RiskLevel::from_findings(findings);

    let summary = if findings.is_empty() {
        "The assessment completed without detecting any issues in the passive check \
         battery. This does not prove the absence of vulnerabilities; it reflects the \
         limits of non-intrusive testing."
            .to_string()
    } else {
        format!(
            "The assessment detected {} issue(s): {} critical, {} high, {} medium, and \
             {} low severity. Overall risk is rated {}. Findings are based on passive \
             heuristics and should be verified manually before remediation is prioritized.",
            findings.len(),
            critical,
            high,
            medium,
            low,
            risk_level.as_str()
        )
    };

    // Critical list: all Critical/High findings verbatim.
    let critical_findings: Vec<String> = findings
        .iter()
        .filter(|f| f.severity.rank() <= Severity::High.rank())
        .map(|f| f.title.clone())
        .collect();

    let mut recommendations: Vec<String> = Vec::new();
    for finding in findings {
        if let Some(rec) = recommendation_for(&finding.title) {
            if !recommendations.iter().any(|r| r == rec) {
                recommendations.push(rec.to_string());
            }
        }
    }
    if recommendations.is_empty() {
        recommendations.push(
            "Maintain the current security posture and re-assess after significant changes."
                .to_string(),
        );
    }

    AiAnalysis {
        summary,
        risk_level,
        critical_findings,
        recommendations,
    }
}
