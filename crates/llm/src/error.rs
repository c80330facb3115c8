use thiserror::Error;

/// Errors from chat-completion providers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("model refused the request: {0}")]
    Refusal(String),

    #[error("response truncated: token limit reached before the output was complete")]
    LengthLimit,

    #[error("response blocked by the provider's content filter")]
    ContentFilter,

    #[error("response does not match the output schema: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, Error>;
