//! Structured-output chat backends.
//!
//! This crate is the boundary to the external chat-completion service. It
//! defines provider-agnostic message types, the [`ChatBackend`] trait, and an
//! OpenAI implementation that asks the model to answer in a given JSON schema
//! and hands back the parsed payload.
//!
//! # Example
//!
//! ```no_run
//! use llm::{ChatBackend, Message, OpenAiBackend, ParseRequest, ResponseFormat};
//! use serde_json::json;
//!
//! # async fn example() -> llm::Result<()> {
//! let backend = OpenAiBackend::from_env()?;
//! let format = ResponseFormat::new(
//!     "Answer",
//!     json!({
//!         "type": "object",
//!         "properties": {"answer": {"type": "string"}},
//!         "required": ["answer"],
//!         "additionalProperties": false
//!     }),
//! );
//! let messages = [Message::user("What is the capital of France?")];
//! let parsed = backend
//!     .parse(ParseRequest {
//!         model: "gpt-4o-mini",
//!         messages: &messages,
//!         format: &format,
//!     })
//!     .await?;
//! println!("{}", parsed.value["answer"]);
//! # Ok(())
//! # }
//! ```

mod backend;
mod config;
mod error;
mod types;

pub use backend::{ChatBackend, OpenAiBackend, OpenAiBackendBuilder};
pub use config::{DEFAULT_BASE_URL, OpenAiConfig};
pub use error::{Error, Result};
pub use types::{Message, ParseRequest, ParsedResponse, ResponseFormat, Role, Usage};
