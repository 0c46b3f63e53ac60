use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Configuration for the Anthropic API client
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key (from ANTHROPIC_API_KEY env var)
    pub api_key: String,
    /// Model to use; ANTHROPIC_MODEL overrides the default
    pub model: String,
    /// Temperature (0-1, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
}

impl AnthropicConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY environment variable not set")?;
        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self::new(api_key, model))
    }

    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.0,
            max_tokens: 1024,
        }
    }
}

/// A tool the model is forced to call, used to get structured JSON back
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Anything that can answer a prompt with a forced tool call
///
/// Implemented by the HTTP client and by scripted clients in tests.
#[async_trait]
pub trait ToolClient: Send + Sync {
    /// Send the prompt and return the tool call's input object
    async fn call_tool(
        &self,
        system: &str,
        user: &str,
        tool: &ToolSpec,
    ) -> Result<serde_json::Value>;
}

/// Anthropic API client
pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ToolClient for AnthropicClient {
    async fn call_tool(
        &self,
        system: &str,
        user: &str,
        tool: &ToolSpec,
    ) -> Result<serde_json::Value> {
        let request = AnthropicToolRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            system: Some(system.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
            tools: vec![tool.clone()],
            tool_choice: Some(ToolChoice {
                choice_type: "tool".to_string(),
                name: tool.name.clone(),
            }),
        };

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Anthropic API error: {} - {}", status, body);
        }

        let response: AnthropicResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic API response")?;

        response
            .content
            .into_iter()
            .find(|c| c.content_type == "tool_use" && c.name.as_deref() == Some(tool.name.as_str()))
            .and_then(|c| c.input)
            .with_context(|| format!("No {} tool_use block in response", tool.name))
    }
}

#[derive(Debug, Serialize)]
struct AnthropicToolRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    tools: Vec<ToolSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    choice_type: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<serde_json::Value>,
}

/// Test client that replays queued tool inputs in order
#[cfg(test)]
pub(crate) struct ScriptedClient {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<serde_json::Value, String>>>,
    prompts: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl ScriptedClient {
    pub(crate) fn new(responses: Vec<Result<serde_json::Value, String>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into()),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ToolClient for ScriptedClient {
    async fn call_tool(
        &self,
        _system: &str,
        user: &str,
        _tool: &ToolSpec,
    ) -> Result<serde_json::Value> {
        self.prompts.lock().unwrap().push(user.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => anyhow::bail!("no scripted response left"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_defaults() {
        let config = AnthropicConfig::new("key".to_string(), "model".to_string());
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 1024);
    }

    #[test]
    fn test_tool_use_block_parsing() {
        let json = r#"{"content": [
            {"type": "text", "text": "thinking"},
            {"type": "tool_use", "name": "submit", "input": {"ok": true}}
        ]}"#;
        let response: AnthropicResponse = serde_json::from_str(json).unwrap();
        let input = response
            .content
            .into_iter()
            .find(|c| c.content_type == "tool_use")
            .and_then(|c| c.input)
            .unwrap();
        assert_eq!(input["ok"], true);
    }

    #[tokio::test]
    async fn test_scripted_client_replays_in_order() {
        let client = ScriptedClient::new(vec![
            Ok(serde_json::json!({"n": 1})),
            Err("boom".to_string()),
        ]);
        let tool = ToolSpec {
            name: "t".to_string(),
            description: String::new(),
            input_schema: serde_json::json!({}),
        };

        assert_eq!(client.call_tool("s", "first", &tool).await.unwrap()["n"], 1);
        assert!(client.call_tool("s", "second", &tool).await.is_err());
        assert!(client.call_tool("s", "third", &tool).await.is_err());
        assert_eq!(client.prompts(), vec!["first", "second", "third"]);
    }
}
