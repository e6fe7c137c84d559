use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Sentinel recorded for server/framework disclosure headers that are absent.
pub const NOT_DISCLOSED: &str = "not disclosed";

/// The security headers tracked in every recon snapshot, in canonical order.
pub const TRACKED_SECURITY_HEADERS: &[&str] = &[
    "content-security-policy",
    "strict-transport-security",
    "x-frame-options",
    "x-content-type-options",
    "x-xss-protection",
    "referrer-policy",
    "permissions-policy",
];

/// Coarse classification of a failed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeErrorKind {
    Timeout,
    Dns,
    Connect,
    Other,
}

/// Transport failure descriptor carried inside `ReconResult`. A probe that
/// fails produces this, not an `Err` — downstream stages must tolerate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeError {
    pub kind: ProbeErrorKind,
    pub message: String,
}

impl ProbeError {
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ProbeErrorKind::Timeout
        } else if err.is_connect() {
            // reqwest folds DNS resolution failures into connect errors;
            // inspect the message to keep the classification coarse but useful
            let msg = format!("{:?}", err);
            if msg.contains("dns") || msg.contains("resolve") {
                ProbeErrorKind::Dns
            } else {
                ProbeErrorKind::Connect
            }
        } else {
            ProbeErrorKind::Other
        };
        Self { kind, message: err.to_string() }
    }
}

/// Outcome of the single passive probe against the target. Read-only after
/// the collector produces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconResult {
    /// HTTP status of the probe response; None when the transport failed.
    pub status: Option<u16>,
    /// All response headers, lowercased names, joined values.
    pub headers: HashMap<String, String>,
    /// Raw Set-Cookie strings, preserved verbatim. Flag parsing happens in
    /// the cookie-security check, not here.
    pub cookies: Vec<String>,
    /// Detected technology tags. Duplicates are allowed.
    pub technologies: Vec<String>,
    /// Snapshot of the tracked security headers; absent headers are recorded
    /// as null, never omitted.
    pub security_headers: HashMap<String, Option<String>>,
    /// Raw values of server/x-powered-by/x-aspnet-version, with the
    /// "not disclosed" sentinel when absent.
    pub server_disclosure: HashMap<String, String>,
    /// Present when the probe itself failed at the transport level.
    pub error: Option<ProbeError>,
}

impl ReconResult {
    /// An empty result carrying only the transport failure descriptor.
    /// The security-header snapshot still has all tracked keys (all null) so
    /// consumers never need to special-case a missing map.
    pub fn failed(error: ProbeError) -> Self {
        let mut security_headers = HashMap::new();
        for name in TRACKED_SECURITY_HEADERS {
            security_headers.insert((*name).to_string(), None);
        }
        Self {
            status: None,
            headers: HashMap::new(),
            cookies: Vec::new(),
            technologies: Vec::new(),
            security_headers,
            server_disclosure: HashMap::new(),
            error: Some(error),
        }
    }

    pub fn probe_failed(&self) -> bool {
        self.error.is_some()
    }
}
