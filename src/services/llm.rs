use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    pub provider: String, // "gemini", "ollama" or "openai"
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    pub gemini: Option<GeminiConfig>,
    pub ollama: Option<OllamaConfig>,
    pub openai: Option<OpenAIConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

fn default_timeout() -> u64 {
    60
}

/// Sampling knobs passed with every chat request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 2000,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub trait LlmBounds {}
#[cfg(target_arch = "wasm32")]
impl<T> LlmBounds for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait LlmBounds: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> LlmBounds for T {}

/// A single-turn chat completion. Implementations return an error rather than
/// an empty string when the provider produced no text.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait LlmClient: LlmBounds + Debug {
    async fn chat(&self, system: &str, user: &str, options: &ChatOptions) -> Result<String>;
}

pub fn create_llm(config: &LlmConfig) -> Result<Box<dyn LlmClient>> {
    let client = http_client(config.timeout_seconds)?;
    match config.provider.as_str() {
        "gemini" => {
            let cfg = config.gemini.as_ref().context("Gemini config missing")?;
            Ok(Box::new(GeminiClient::new(&cfg.api_key, &cfg.model, client)))
        }
        "ollama" => {
            let cfg = config.ollama.as_ref().context("Ollama config missing")?;
            Ok(Box::new(OllamaClient::new(&cfg.base_url, &cfg.model, client)))
        }
        "openai" => {
            let cfg = config.openai.as_ref().context("OpenAI config missing")?;
            Ok(Box::new(OpenAIClient::new(&cfg.api_key, &cfg.model, cfg.base_url.as_deref(), client)))
        }
        _ => Err(anyhow!("Unknown LLM provider: {}", config.provider)),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn http_client(timeout_seconds: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .build()
        .context("Failed to build HTTP client")
}

// Browsers apply their own fetch timeouts.
#[cfg(target_arch = "wasm32")]
fn http_client(_timeout_seconds: u64) -> Result<reqwest::Client> {
    Ok(reqwest::Client::new())
}

fn non_empty(text: String, provider: &str) -> Result<String> {
    if text.trim().is_empty() {
        Err(anyhow!("{} returned empty content", provider))
    } else {
        Ok(text)
    }
}

// --- Gemini ---
#[derive(Debug)]
struct GeminiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiClient {
    fn new(api_key: &str, model: &str, client: reqwest::Client) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
        }
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GeminiError {
    message: String,
}

impl GeminiResponse {
    fn into_text(self) -> Result<String> {
        if let Some(err) = self.error {
            return Err(anyhow!("Gemini API returned error: {}", err.message));
        }

        let first = self
            .candidates
            .and_then(|c| c.into_iter().next())
            .ok_or_else(|| anyhow!("Gemini response had no candidates"))?;

        let text: String = first
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = first.finish_reason.as_deref().unwrap_or("UNKNOWN");
            return Err(anyhow!("Gemini response empty. Finish reason: {}", reason));
        }
        Ok(text)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LlmClient for GeminiClient {
    async fn chat(&self, system: &str, user: &str, options: &ChatOptions) -> Result<String> {
        let request = self.build_request(system, user, options)?;
        let resp = self.client.execute(request).await.map_err(reqwest::Error::without_url)?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.map_err(reqwest::Error::without_url)?;
            return Err(anyhow!("Gemini API error: {}", error_text));
        }

        let response_text = resp.text().await.map_err(reqwest::Error::without_url)?;
        let result: GeminiResponse = serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse Gemini response. Body: {}", response_text))?;
        result.into_text()
    }
}

impl GeminiClient {
    /// The key travels in `x-goog-api-key`, never in the URL, so transport
    /// errors that echo the URL cannot carry it.
    fn build_request(&self, system: &str, user: &str, options: &ChatOptions) -> Result<reqwest::Request> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart { text: user.to_string() }],
            }],
            system_instruction: Some(GeminiSystemInstruction {
                parts: vec![GeminiPart { text: system.to_string() }],
            }),
            generation_config: GeminiGenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens,
            },
        };

        self.client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .build()
            .context("Failed to build Gemini request")
    }
}

// --- Ollama ---
#[derive(Debug)]
struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaClient {
    fn new(base_url: &str, model: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn pair(system: &str, user: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage { role: "system".to_string(), content: system.to_string() },
            ChatMessage { role: "user".to_string(), content: user.to_string() },
        ]
    }
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: OllamaMessageResponse,
}

#[derive(Deserialize)]
struct OllamaMessageResponse {
    content: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LlmClient for OllamaClient {
    async fn chat(&self, system: &str, user: &str, options: &ChatOptions) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);

        let request_body = OllamaRequest {
            model: self.model.clone(),
            messages: ChatMessage::pair(system, user),
            stream: false,
            options: OllamaOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        let resp = self.client.post(&url).json(&request_body).send().await?;

        if !resp.status().is_success() {
            let error_text = resp.text().await?;
            return Err(anyhow!("Ollama API error: {}", error_text));
        }

        let result: OllamaResponse = resp.json().await?;
        non_empty(result.message.content, "Ollama")
    }
}

// --- OpenAI ---

#[derive(Debug)]
struct OpenAIClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAIClient {
    fn new(api_key: &str, model: &str, base_url: Option<&str>, client: reqwest::Client) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url
                .unwrap_or("https://api.openai.com/v1")
                .trim_end_matches('/')
                .to_string(),
            client,
        }
    }
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessageResponse,
}

#[derive(Deserialize)]
struct OpenAIMessageResponse {
    content: Option<String>,
}

impl OpenAIResponse {
    fn into_text(self) -> Result<String> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("OpenAI response empty or missing content"))?;
        non_empty(content, "OpenAI")
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LlmClient for OpenAIClient {
    async fn chat(&self, system: &str, user: &str, options: &ChatOptions) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request_body = OpenAIRequest {
            model: self.model.clone(),
            messages: ChatMessage::pair(system, user),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let error_text = resp.text().await?;
            return Err(anyhow!("OpenAI API error: {}", error_text));
        }

        let result: OpenAIResponse = resp.json().await?;
        result.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_response_safety_block_is_error() {
        let json = r#"{
            "candidates": [
                {
                    "finishReason": "SAFETY",
                    "index": 0
                }
            ]
        }"#;

        let result: GeminiResponse = serde_json::from_str(json).unwrap();
        let err = result.into_text().unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_gemini_response_empty_parts_is_error() {
        let json = r#"{
            "candidates": [
                {
                    "content": { "role": "model" },
                    "finishReason": "STOP",
                    "index": 0
                }
            ]
        }"#;

        let result: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(result.into_text().is_err());
    }

    #[test]
    fn test_gemini_response_joins_parts() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [
                            { "text": "[{\"name\": " },
                            { "text": "\"A\"}]" }
                        ],
                        "role": "model"
                    },
                    "finishReason": "STOP",
                    "index": 0
                }
            ]
        }"#;

        let result: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(result.into_text().unwrap(), r#"[{"name": "A"}]"#);
    }

    #[test]
    fn test_gemini_api_error_is_surfaced() {
        let json = r#"{ "error": { "code": 400, "message": "API key not valid" } }"#;
        let result: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(result.into_text().unwrap_err().to_string().contains("API key not valid"));
    }

    #[test]
    fn test_gemini_request_carries_generation_config() {
        let body = GeminiRequest {
            contents: vec![],
            system_instruction: None,
            generation_config: GeminiGenerationConfig {
                temperature: 0.8,
                max_output_tokens: 2000,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2000);
        assert!(value.get("system_instruction").is_none());
    }

    #[test]
    fn test_gemini_key_is_sent_as_header_not_in_url() {
        let client = GeminiClient::new("SECRET_KEY_123", "gemini-test", reqwest::Client::new());
        let request = client
            .build_request("system", "user", &ChatOptions::default())
            .unwrap();

        assert!(!request.url().as_str().contains("SECRET_KEY_123"));
        assert!(request.url().query().is_none());
        assert_eq!(
            request.headers().get("x-goog-api-key").unwrap(),
            "SECRET_KEY_123"
        );
    }

    #[test]
    fn test_openai_response_parsing_success() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-3.5-turbo-0613",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Hello there, how may I assist you today?"
                },
                "finish_reason": "stop"
            }]
        }"#;

        let result: OpenAIResponse = serde_json::from_str(json).unwrap();
        assert_eq!(result.into_text().unwrap(), "Hello there, how may I assist you today?");
    }

    #[test]
    fn test_openai_null_content_is_error() {
        let json = r#"{ "choices": [{ "message": { "role": "assistant", "content": null } }] }"#;
        let result: OpenAIResponse = serde_json::from_str(json).unwrap();
        assert!(result.into_text().is_err());

        let json = r#"{ "choices": [{ "message": { "role": "assistant", "content": "  " } }] }"#;
        let result: OpenAIResponse = serde_json::from_str(json).unwrap();
        assert!(result.into_text().is_err());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let config = LlmConfig {
            provider: "mystery".to_string(),
            timeout_seconds: 5,
            gemini: None,
            ollama: None,
            openai: None,
        };
        assert!(create_llm(&config).is_err());

        let config = LlmConfig { provider: "ollama".to_string(), ..config };
        let err = create_llm(&config).unwrap_err();
        assert!(err.to_string().contains("Ollama config missing"));
    }
}
