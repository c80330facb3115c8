//! OpenAI chat-completions backend with structured outputs.

use super::ChatBackend;
use crate::config::OpenAiConfig;
use crate::types::{Message, ParseRequest, ParsedResponse, ResponseFormat, Usage};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    response_format: ApiResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ApiResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: &'a ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Builder for creating an OpenAI backend.
#[derive(Debug, Clone)]
pub struct OpenAiBackendBuilder {
    config: OpenAiConfig,
}

impl OpenAiBackendBuilder {
    /// Create a new builder from connection settings.
    pub fn new(config: OpenAiConfig) -> Self {
        Self { config }
    }

    /// Override the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Override the API root, e.g. for a compatible proxy.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Build the backend. Fails if no API key is configured.
    pub fn build(self) -> Result<OpenAiBackend> {
        let api_key = self.config.require_api_key()?.to_string();
        let endpoint = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        Ok(OpenAiBackend {
            http: reqwest::Client::new(),
            api_key,
            endpoint,
            organization: self.config.organization,
            project: self.config.project,
        })
    }
}

/// OpenAI chat-completions backend.
pub struct OpenAiBackend {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    organization: Option<String>,
    project: Option<String>,
}

impl OpenAiBackend {
    /// Create a builder for the OpenAI backend.
    pub fn builder(config: OpenAiConfig) -> OpenAiBackendBuilder {
        OpenAiBackendBuilder::new(config)
    }

    /// Create a backend from `OPENAI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::builder(OpenAiConfig::from_env()).build()
    }
}

impl std::fmt::Display for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "openai({})", self.endpoint)
    }
}

impl ChatBackend for OpenAiBackend {
    async fn parse(&self, request: ParseRequest<'_>) -> Result<ParsedResponse> {
        let body = ApiRequest {
            model: request.model,
            messages: request.messages,
            response_format: ApiResponseFormat {
                format_type: "json_schema",
                json_schema: request.format,
            },
        };

        debug!(
            model = request.model,
            schema = %request.format.name,
            endpoint = %self.endpoint,
            "sending structured chat completion"
        );

        let mut req = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .header("accept", "application/json");
        if let Some(org) = &self.organization {
            req = req.header("OpenAI-Organization", org);
        }
        if let Some(project) = &self.project {
            req = req.header("OpenAI-Project", project);
        }

        let response = req
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status, "chat completion request failed");
            return Err(Error::Api { status, body });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        into_parsed(api_response)
    }
}

fn into_parsed(response: ApiResponse) -> Result<ParsedResponse> {
    let usage = response
        .usage
        .map(|u| Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidResponse("no choices in response".into()))?;

    match choice.finish_reason.as_deref() {
        Some("length") => return Err(Error::LengthLimit),
        Some("content_filter") => return Err(Error::ContentFilter),
        _ => {}
    }

    if let Some(refusal) = choice.message.refusal {
        return Err(Error::Refusal(refusal));
    }

    let content = choice
        .message
        .content
        .ok_or_else(|| Error::InvalidResponse("message has no content".into()))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| Error::InvalidResponse(format!("content is not JSON: {e}")))?;

    debug!(
        input_tokens = usage.input_tokens,
        output_tokens = usage.output_tokens,
        "structured chat completion parsed"
    );

    Ok(ParsedResponse { value, usage })
}
