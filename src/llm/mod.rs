pub mod anthropic;
pub mod provider;
pub mod types;

pub use anthropic::AnthropicProvider;
pub use provider::LlmProvider;
pub use types::LlmResponse;

use crate::config::ScannerConfig;

/// Build the live provider when an API key is configured. `None` means
/// synthesis runs on the deterministic fallback unconditionally.
pub fn create_provider(config: &ScannerConfig) -> Option<AnthropicProvider> {
    config.llm.api_key.as_deref().map(|key| {
        AnthropicProvider::new(key, &config.llm.model, &config.llm.base_url, config.ai_timeout())
    })
}

/// Cheap liveness signal for the AI backend, consumed by the health route.
/// Key-presence only; no request leaves the process.
pub fn backend_configured(config: &ScannerConfig) -> bool {
    config.llm.api_key.is_some()
}
