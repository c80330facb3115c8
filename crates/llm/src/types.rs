//! Provider-agnostic request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a message with a role and text content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// JSON schema the model output must follow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    /// Schema name, restricted to `[A-Za-z0-9_-]` and at most 64 characters.
    pub name: String,
    /// JSON Schema of the expected payload.
    pub schema: Value,
    /// Ask the provider to enforce the schema exactly.
    pub strict: bool,
}

impl ResponseFormat {
    const MAX_NAME_LEN: usize = 64;

    /// Create a strict format, sanitizing the name for provider use.
    pub fn new(name: &str, schema: Value) -> Self {
        let mut name: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .take(Self::MAX_NAME_LEN)
            .collect();
        if name.is_empty() {
            name.push_str("Response");
        }
        Self {
            name,
            schema,
            strict: true,
        }
    }
}

/// A single structured-output request.
#[derive(Debug, Clone, Copy)]
pub struct ParseRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub format: &'a ResponseFormat,
}

/// Parsed payload returned by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub value: Value,
    pub usage: Usage,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}
