use mockito::Matcher;

use sonda::checks::{reflection::ReflectionCheck, Check, CheckContext};
use sonda::config::ScannerConfig;
use sonda::errors::SondaError;
use sonda::models::recon::{ProbeError, ProbeErrorKind, ReconResult};
use sonda::models::{RiskLevel, Severity};
use sonda::pipeline::{self, GENERATOR_TAG};
use sonda::recon;

fn test_config() -> ScannerConfig {
    // Default config carries no API key, so synthesis uses the fallback
    ScannerConfig::default()
}

fn dummy_recon() -> ReconResult {
    ReconResult::failed(ProbeError {
        kind: ProbeErrorKind::Other,
        message: "not used by this check".into(),
    })
}

#[tokio::test]
async fn test_unhardened_target_full_pipeline() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_header("set-cookie", "sid=abc123")
        .with_body("<html><body>hello</body></html>")
        .expect_at_least(1)
        .create_async()
        .await;

    let report = pipeline::run_scan(&server.url(), &test_config()).await.unwrap();

    // 4 missing-header findings plus 3 cookie-flag findings
    assert_eq!(report.total_findings, 7);
    assert_eq!(report.total_findings, report.findings.len());
    assert_eq!(report.risk_level, RiskLevel::Medium);
    assert_eq!(report.generated_by, GENERATOR_TAG);

    // Fallback analysis is fully populated
    assert!(!report.summary.is_empty());
    assert!(!report.recommendations.is_empty());

    let vulns = &report.technical_details.vulnerabilities;
    assert_eq!(vulns.tests_run.len(), 5);
    assert!(vulns.failed_checks.is_empty());

    let recon = &report.technical_details.recon;
    assert_eq!(recon.status, Some(200));
    assert_eq!(recon.cookies, vec!["sid=abc123".to_string()]);
}

#[tokio::test]
async fn test_bare_target_yields_exactly_four_header_findings() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html></html>")
        .create_async()
        .await;

    let report = pipeline::run_scan(&server.url(), &test_config()).await.unwrap();

    assert_eq!(report.total_findings, 4);
    let mediums = report.findings.iter().filter(|f| f.severity == Severity::Medium).count();
    let lows = report.findings.iter().filter(|f| f.severity == Severity::Low).count();
    assert_eq!(mediums, 3);
    assert_eq!(lows, 1);
    assert_eq!(report.risk_level, RiskLevel::Medium);
}

#[tokio::test]
async fn test_hardened_target_yields_low_risk() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-security-policy", "default-src 'self'")
        .with_header("strict-transport-security", "max-age=63072000")
        .with_header("x-frame-options", "DENY")
        .with_header("x-content-type-options", "nosniff")
        .with_body("<html></html>")
        .create_async()
        .await;

    let report = pipeline::run_scan(&server.url(), &test_config()).await.unwrap();

    assert_eq!(report.total_findings, 0);
    assert_eq!(report.risk_level, RiskLevel::Low);
    assert!(!report.summary.is_empty());
    assert!(!report.recommendations.is_empty());
}

#[tokio::test]
async fn test_cors_wildcard_with_credentials_is_high() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("access-control-allow-origin", "*")
        .with_header("access-control-allow-credentials", "true")
        .with_body("<html></html>")
        .create_async()
        .await;

    let report = pipeline::run_scan(&server.url(), &test_config()).await.unwrap();

    let cors = report
        .findings
        .iter()
        .find(|f| f.title == "Exploitable CORS configuration")
        .expect("CORS finding missing");
    assert_eq!(cors.severity, Severity::High);
    assert_eq!(report.risk_level, RiskLevel::High);
}

#[tokio::test]
async fn test_cors_reflected_origin_is_high() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("access-control-allow-origin", "https://attacker.invalid")
        .with_body("<html></html>")
        .create_async()
        .await;

    let report = pipeline::run_scan(&server.url(), &test_config()).await.unwrap();
    assert!(report
        .findings
        .iter()
        .any(|f| f.title == "Exploitable CORS configuration" && f.severity == Severity::High));
}

#[tokio::test]
async fn test_cors_bare_wildcard_is_low() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("access-control-allow-origin", "*")
        .with_body("<html></html>")
        .create_async()
        .await;

    let report = pipeline::run_scan(&server.url(), &test_config()).await.unwrap();
    assert!(report
        .findings
        .iter()
        .any(|f| f.title == "Permissive CORS policy" && f.severity == Severity::Low));
}

#[tokio::test]
async fn test_reflected_marker_yields_one_high_finding() {
    let marker = "sondatest\"'><";
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(format!("<html>You searched for: {}</html>", marker))
        .create_async()
        .await;

    let config = test_config();
    let client = recon::build_probe_client(&config).unwrap();
    let recon_result = dummy_recon();
    let ctx = CheckContext { client: &client, recon: &recon_result };
    let target = reqwest::Url::parse(&server.url()).unwrap();

    let findings = ReflectionCheck::with_marker(marker)
        .run(&target, &ctx)
        .await
        .unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::High);
    assert_eq!(findings[0].title, "Reflected input (XSS indicator)");
    assert!(findings[0].description.contains("indicator"));
}

#[tokio::test]
async fn test_escaped_marker_yields_no_finding() {
    let marker = "sondatest\"'><";
    let escaped = "sondatest&quot;&#x27;&gt;&lt;";
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(format!("<html>You searched for: {}</html>", escaped))
        .create_async()
        .await;

    let config = test_config();
    let client = recon::build_probe_client(&config).unwrap();
    let recon_result = dummy_recon();
    let ctx = CheckContext { client: &client, recon: &recon_result };
    let target = reqwest::Url::parse(&server.url()).unwrap();

    let findings = ReflectionCheck::with_marker(marker)
        .run(&target, &ctx)
        .await
        .unwrap();
    assert!(findings.is_empty());
}

#[tokio::test]
async fn test_sql_error_disclosure_is_critical() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("You have an error in your SQL syntax near ''' at line 1")
        .create_async()
        .await;

    let report = pipeline::run_scan(&server.url(), &test_config()).await.unwrap();

    let sql = report
        .findings
        .iter()
        .find(|f| f.title == "SQL error message disclosure")
        .expect("SQL finding missing");
    assert_eq!(sql.severity, Severity::Critical);
    assert_eq!(report.risk_level, RiskLevel::High);
    // The Critical finding lands in the fallback's critical list verbatim
    assert!(report
        .critical_findings
        .contains(&"SQL error message disclosure".to_string()));
}

#[tokio::test]
async fn test_unreachable_target_degrades_without_failing() {
    // Nothing listens on port 1; every probe is refused
    let report = pipeline::run_scan("http://127.0.0.1:1", &test_config()).await.unwrap();

    let recon = &report.technical_details.recon;
    assert!(recon.error.is_some());
    assert!(recon.cookies.is_empty());

    let vulns = &report.technical_details.vulnerabilities;
    assert_eq!(vulns.tests_run.len(), 5);
    assert_eq!(vulns.failed_checks.len(), 5);

    assert_eq!(report.total_findings, 0);
    assert_eq!(report.risk_level, RiskLevel::Low);
    assert!(!report.summary.is_empty());
    assert_eq!(report.generated_by, GENERATOR_TAG);
}

#[tokio::test]
async fn test_malformed_url_fails_before_any_network_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = pipeline::run_scan("not-a-url", &test_config()).await.unwrap_err();
    assert!(matches!(err, SondaError::InvalidTarget(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_live_synthesis_feeds_summary_but_not_risk_level() {
    let mut target = mockito::Server::new_async().await;
    let _target_mock = target
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-security-policy", "default-src 'self'")
        .with_header("strict-transport-security", "max-age=63072000")
        .with_header("x-frame-options", "DENY")
        .with_header("x-content-type-options", "nosniff")
        .with_body("<html></html>")
        .create_async()
        .await;

    let mut llm = mockito::Server::new_async().await;
    let model_output = r#"{"summary": "Narrative from the model.", "riskLevel": "High", "criticalFindings": ["something"], "recommendations": ["Do the thing"]}"#;
    let _llm_mock = llm
        .mock("POST", "/v1/messages")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "content": [{"type": "text", "text": model_output}],
                "usage": {"input_tokens": 100, "output_tokens": 50}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut config = test_config();
    config.llm.api_key = Some("test-key".into());
    config.llm.base_url = llm.url();

    let report = pipeline::run_scan(&target.url(), &config).await.unwrap();

    assert_eq!(report.summary, "Narrative from the model.");
    assert_eq!(report.recommendations, vec!["Do the thing".to_string()]);
    // No findings, so the mechanical risk level is Low even though the
    // model's opinion is High: the computed label is canonical.
    assert_eq!(report.risk_level, RiskLevel::Low);
}

#[tokio::test]
async fn test_ai_backend_failure_falls_back_deterministically() {
    let mut target = mockito::Server::new_async().await;
    let _target_mock = target
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html></html>")
        .create_async()
        .await;

    let mut llm = mockito::Server::new_async().await;
    let _llm_mock = llm
        .mock("POST", "/v1/messages")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let mut config = test_config();
    config.llm.api_key = Some("test-key".into());
    config.llm.base_url = llm.url();

    let report = pipeline::run_scan(&target.url(), &config).await.unwrap();

    // Report is complete: fallback summary, recommendations, intact tag
    assert!(!report.summary.is_empty());
    assert!(!report.recommendations.is_empty());
    assert_eq!(report.generated_by, GENERATOR_TAG);
    assert_eq!(report.total_findings, 4);
    assert_eq!(report.risk_level, RiskLevel::Medium);
}
