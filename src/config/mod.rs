use std::time::Duration;
use serde::{Deserialize, Serialize};

/// User agent sent on every outbound probe. Identifying on purpose: passive
/// assessment traffic should be attributable by the target's operators.
pub const SCANNER_USER_AGENT: &str = "sonda-security-scanner/0.3";

/// Scanner tuning. Probe limits are fixed by policy; the AI settings come
/// from the environment so the same binary runs with or without a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Per-probe timeout, applied to the collector and every battery check.
    pub probe_timeout_secs: u64,
    /// Redirect-following cap for the passive probe.
    pub max_redirects: usize,
    /// Timeout for the AI synthesis call, distinct from probe timeouts.
    pub ai_timeout_secs: u64,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the hosted model; None means the deterministic fallback
    /// is used unconditionally.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 10,
            max_redirects: 5,
            ai_timeout_secs: 30,
            llm: LlmConfig {
                api_key: None,
                model: "claude-sonnet-4-5-20250929".to_string(),
                base_url: "https://api.anthropic.com".to_string(),
            },
        }
    }
}

impl ScannerConfig {
    /// Resolve from the environment: SONDA_API_KEY (falling back to
    /// ANTHROPIC_API_KEY), SONDA_MODEL, SONDA_LLM_BASE_URL.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.llm.api_key = std::env::var("SONDA_API_KEY")
            .or_else(|_| std::env::var("ANTHROPIC_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        if let Ok(model) = std::env::var("SONDA_MODEL") {
            config.llm.model = model;
        }
        if let Ok(base_url) = std::env::var("SONDA_LLM_BASE_URL") {
            config.llm.base_url = base_url;
        }
        config
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }
}
