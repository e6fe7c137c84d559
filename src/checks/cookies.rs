use async_trait::async_trait;
use reqwest::Url;

use super::{Check, CheckContext};
use crate::errors::SondaError;
use crate::models::{Finding, Severity};

/// Attribute view of one raw Set-Cookie string.
#[derive(Debug, PartialEq)]
struct CookieFlags {
    name: String,
    http_only: bool,
    secure: bool,
    same_site: Option<String>,
}

fn parse_cookie(raw: &str) -> CookieFlags {
    let mut parts = raw.split(';');
    let name = parts
        .next()
        .and_then(|pair| pair.split('=').next())
        .unwrap_or("")
        .trim()
        .to_string();

    let mut flags = CookieFlags {
        name,
        http_only: false,
        secure: false,
        same_site: None,
    };
    for attr in parts {
        let attr = attr.trim();
        if attr.eq_ignore_ascii_case("httponly") {
            flags.http_only = true;
        } else if attr.eq_ignore_ascii_case("secure") {
            flags.secure = true;
        } else if let Some(value) = attr
            .split_once('=')
            .filter(|(k, _)| k.trim().eq_ignore_ascii_case("samesite"))
            .map(|(_, v)| v.trim())
        {
            flags.same_site = Some(value.to_string());
        }
    }
    flags
}

/// Validates the flags of every cookie the collector captured. Each missing
/// attribute is its own finding, scoped to the cookie name.
pub struct CookieSecurityCheck;

#[async_trait]
impl Check for CookieSecurityCheck {
    fn name(&self) -> &'static str {
        "cookie_security"
    }

    async fn run(&self, _target: &Url, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, SondaError> {
        if ctx.recon.probe_failed() {
            return Err(SondaError::Network(
                "reconnaissance probe failed, no cookies captured".into(),
            ));
        }

        let mut findings = Vec::new();
        for raw in &ctx.recon.cookies {
            let cookie = parse_cookie(raw);
            if !cookie.http_only {
                findings.push(Finding::new(
                    format!("Cookie '{}' missing HttpOnly flag", cookie.name),
                    Severity::Medium,
                    format!(
                        "The cookie '{}' is readable from JavaScript; script injection \
                         on any page would expose it.",
                        cookie.name
                    ),
                ));
            }
            if !cookie.secure {
                findings.push(Finding::new(
                    format!("Cookie '{}' missing Secure flag", cookie.name),
                    Severity::Medium,
                    format!(
                        "The cookie '{}' may be transmitted over plain HTTP, exposing \
                         it to on-path interception.",
                        cookie.name
                    ),
                ));
            }
            let weak_same_site = match cookie.same_site.as_deref() {
                None => true,
                Some(v) => v.eq_ignore_ascii_case("none") && !cookie.secure,
            };
            if weak_same_site {
                findings.push(Finding::new(
                    format!("Cookie '{}' missing or weak SameSite attribute", cookie.name),
                    Severity::Medium,
                    format!(
                        "The cookie '{}' has no effective SameSite restriction and will \
                         be attached to cross-site requests.",
                        cookie.name
                    ),
                ));
            }
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recon::{ReconResult, TRACKED_SECURITY_HEADERS};
    use std::collections::HashMap;

    fn recon_with_cookies(cookies: &[&str]) -> ReconResult {
        let mut security_headers = HashMap::new();
        for name in TRACKED_SECURITY_HEADERS {
            security_headers.insert((*name).to_string(), None);
        }
        ReconResult {
            status: Some(200),
            headers: HashMap::new(),
            cookies: cookies.iter().map(|s| s.to_string()).collect(),
            technologies: vec![],
            security_headers,
            server_disclosure: HashMap::new(),
            error: None,
        }
    }

    async fn run_check(cookies: &[&str]) -> Vec<Finding> {
        let client = reqwest::Client::new();
        let recon = recon_with_cookies(cookies);
        let ctx = CheckContext { client: &client, recon: &recon };
        let target = Url::parse("https://example.com").unwrap();
        CookieSecurityCheck.run(&target, &ctx).await.unwrap()
    }

    #[test]
    fn test_parse_cookie_attributes() {
        let flags = parse_cookie("sid=abc123; Path=/; HttpOnly; Secure; SameSite=Lax");
        assert_eq!(flags.name, "sid");
        assert!(flags.http_only);
        assert!(flags.secure);
        assert_eq!(flags.same_site.as_deref(), Some("Lax"));
    }

    #[tokio::test]
    async fn test_bare_cookie_yields_three_findings() {
        let findings = run_check(&["sid=abc123"]).await;
        assert_eq!(findings.len(), 3);
        assert!(findings.iter().all(|f| f.severity == Severity::Medium));
        assert!(findings.iter().all(|f| f.title.contains("'sid'")));
    }

    #[tokio::test]
    async fn test_fully_flagged_cookie_is_clean() {
        let findings =
            run_check(&["sid=abc123; HttpOnly; Secure; SameSite=Strict"]).await;
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn test_samesite_none_without_secure_is_weak() {
        let findings = run_check(&["sid=abc; HttpOnly; SameSite=None"]).await;
        // Missing Secure plus weak SameSite
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().any(|f| f.title.contains("SameSite")));
    }

    #[tokio::test]
    async fn test_samesite_none_with_secure_is_accepted() {
        let findings = run_check(&["sid=abc; HttpOnly; Secure; SameSite=None"]).await;
        assert!(findings.is_empty());
    }
}
