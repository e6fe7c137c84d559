use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::SondaError;
use super::provider::LlmProvider;
use super::types::LlmResponse;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    /// The client timeout here is the synthesis timeout, deliberately
    /// distinct from the scanner's probe timeout.
    pub fn new(api_key: &str, model: &str, base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LlmResponse, SondaError> {
        let mut body = json!({
            "model": self.model,
            "max_tokens": 2048,
            "messages": [{"role": "user", "content": prompt}]
        });

        if let Some(sys) = system {
            body["system"] = json!(sys);
        }

        let resp = self.client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SondaError::Timeout(format!("Anthropic API request timed out: {}", e))
                } else {
                    SondaError::Network(format!("Anthropic API request failed: {}", e))
                }
            })?;

        let status = resp.status();
        if status == 401 {
            return Err(SondaError::Authentication("Invalid Anthropic API key".into()));
        }
        if !status.is_success() {
            return Err(SondaError::LLMApi(format!(
                "Anthropic API returned status {}",
                status
            )));
        }

        let data: Value = resp.json().await
            .map_err(|e| SondaError::LLMApi(format!("Failed to parse Anthropic response: {}", e)))?;

        if let Some(error) = data.get("error") {
            let msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(SondaError::LLMApi(msg.to_string()));
        }

        let content = data["content"][0]["text"].as_str()
            .ok_or_else(|| SondaError::LLMApi("No content in Anthropic response".into()))?
            .to_string();

        let input_tokens = data["usage"]["input_tokens"].as_u64();
        let output_tokens = data["usage"]["output_tokens"].as_u64();

        debug!(model = %self.model, input_tokens, output_tokens, "Anthropic completion");

        Ok(LlmResponse {
            content,
            input_tokens,
            output_tokens,
            model: self.model.clone(),
        })
    }

    async fn complete_structured(&self, prompt: &str, schema_hint: &Value, system: Option<&str>) -> Result<Value, SondaError> {
        let augmented_prompt = format!(
            "{}\n\nRespond with valid JSON matching this schema:\n```json\n{}\n```\n\nReturn ONLY the JSON, no other text.",
            prompt,
            serde_json::to_string_pretty(schema_hint).unwrap_or_default()
        );

        let response = self.complete(&augmented_prompt, system).await?;
        extract_json(&response.content)
    }

    fn provider_name(&self) -> &str { "anthropic" }
    fn model_name(&self) -> &str { &self.model }
}

pub(crate) fn extract_json(text: &str) -> Result<Value, SondaError> {
    // Try direct parse first
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return Ok(v);
    }
    // Try extracting from markdown code block
    if let Some(start) = text.find("```json") {
        let rest = &text[start + 7..];
        if let Some(end) = rest.find("```") {
            let json_str = rest[..end].trim();
            return serde_json::from_str(json_str)
                .map_err(|e| SondaError::LLMApi(format!("Invalid JSON in code block: {}", e)));
        }
    }
    // Try finding first { to last }
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            let json_str = &text[start..=end];
            return serde_json::from_str(json_str)
                .map_err(|e| SondaError::LLMApi(format!("Invalid JSON extraction: {}", e)));
        }
    }
    Err(SondaError::LLMApi("No valid JSON found in LLM response".into()))
}
