use async_trait::async_trait;
use crate::errors::SondaError;
use super::types::LlmResponse;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Free-form text completion
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<LlmResponse, SondaError>;

    /// Structured JSON completion
    async fn complete_structured(
        &self,
        prompt: &str,
        schema_hint: &serde_json::Value,
        system: Option<&str>,
    ) -> Result<serde_json::Value, SondaError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
