use std::collections::HashMap;
use reqwest::header::SET_COOKIE;
use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use crate::config::{ScannerConfig, SCANNER_USER_AGENT};
use crate::errors::SondaError;
use crate::models::recon::{
    ProbeError, ReconResult, NOT_DISCLOSED, TRACKED_SECURITY_HEADERS,
};

/// Headers whose raw values disclose the server/framework stack.
const DISCLOSURE_HEADERS: &[&str] = &["server", "x-powered-by", "x-aspnet-version"];

/// Case-sensitive body markers for common frameworks and CMSes. Each match
/// yields one tag; duplicates are left in on purpose.
const BODY_MARKERS: &[(&str, &str)] = &[
    ("wp-content", "WordPress"),
    ("wp-includes", "WordPress"),
    ("ng-version", "Angular"),
    ("ng-app", "Angular"),
    ("data-reactroot", "React"),
    ("__NEXT_DATA__", "Next.js"),
    ("data-v-app", "Vue.js"),
    ("Drupal.settings", "Drupal"),
    ("/media/jui/", "Joomla"),
    ("jquery", "jQuery"),
];

/// Build the HTTP client used for the passive probe and the battery's own
/// requests: bounded redirects, fixed timeout, identifying user agent.
pub fn build_probe_client(config: &ScannerConfig) -> Result<Client, SondaError> {
    Client::builder()
        .user_agent(SCANNER_USER_AGENT)
        .timeout(config.probe_timeout())
        .redirect(Policy::limited(config.max_redirects))
        .build()
        .map_err(|e| SondaError::Internal(format!("Failed to build HTTP client: {}", e)))
}

/// Issue the single passive probe against the target and extract headers,
/// cookies, and technology indicators.
///
/// Any HTTP status is a valid response. A transport failure (DNS, refused
/// connection, timeout) is a recoverable outcome: it returns an empty
/// `ReconResult` carrying the failure descriptor, never an `Err`.
pub async fn collect(client: &Client, target: &Url) -> ReconResult {
    info!(target = %target, "Reconnaissance probe");

    let response = match client.get(target.clone()).send().await {
        Ok(resp) => resp,
        Err(e) => {
            let probe_error = ProbeError::from_reqwest(&e);
            warn!(target = %target, kind = ?probe_error.kind, error = %e, "Probe failed");
            return ReconResult::failed(probe_error);
        }
    };

    let status = response.status().as_u16();

    // Raw Set-Cookie strings, preserved verbatim. Flag parsing belongs to
    // the cookie-security check.
    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .collect();

    let mut headers: HashMap<String, String> = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(v) = value.to_str() {
            headers
                .entry(name.as_str().to_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(v);
                })
                .or_insert_with(|| v.to_string());
        }
    }

    let mut security_headers: HashMap<String, Option<String>> = HashMap::new();
    for name in TRACKED_SECURITY_HEADERS {
        security_headers.insert((*name).to_string(), headers.get(*name).cloned());
    }

    let mut server_disclosure: HashMap<String, String> = HashMap::new();
    for name in DISCLOSURE_HEADERS {
        let value = headers
            .get(*name)
            .cloned()
            .unwrap_or_else(|| NOT_DISCLOSED.to_string());
        server_disclosure.insert((*name).to_string(), value);
    }

    let body = response.text().await.unwrap_or_default();
    let technologies = detect_technologies(&headers, &body);

    debug!(
        status,
        cookies = cookies.len(),
        technologies = ?technologies,
        "Probe complete"
    );

    ReconResult {
        status: Some(status),
        headers,
        cookies,
        technologies,
        security_headers,
        server_disclosure,
        error: None,
    }
}

/// Derive technology tags from header values and a case-sensitive substring
/// scan of the response body.
fn detect_technologies(headers: &HashMap<String, String>, body: &str) -> Vec<String> {
    let mut tags = Vec::new();

    if let Some(powered_by) = headers.get("x-powered-by") {
        if powered_by.contains("PHP") {
            tags.push("PHP".to_string());
        }
        if powered_by.contains("ASP.NET") {
            tags.push("ASP.NET".to_string());
        }
        if powered_by.contains("Express") {
            tags.push("Express".to_string());
        }
    }
    if let Some(server) = headers.get("server") {
        if server.contains("nginx") {
            tags.push("nginx".to_string());
        }
        if server.contains("Apache") {
            tags.push("Apache".to_string());
        }
        if server.contains("cloudflare") {
            tags.push("Cloudflare".to_string());
        }
    }
    if headers.contains_key("x-aspnet-version") {
        tags.push("ASP.NET".to_string());
    }

    for (marker, tag) in BODY_MARKERS {
        if body.contains(marker) {
            tags.push((*tag).to_string());
        }
    }

    tags
}
