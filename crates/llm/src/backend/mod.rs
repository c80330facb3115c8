//! Chat backend abstraction.
//!
//! A backend takes role-tagged messages, a model identifier and a response
//! schema, and returns the parsed payload or fails. Retries, caching and
//! streaming are left to the provider's own client.

mod openai;

pub use openai::{OpenAiBackend, OpenAiBackendBuilder};

use crate::Result;
use crate::types::{ParseRequest, ParsedResponse};
use std::future::Future;

/// Trait for structured-output chat backends.
pub trait ChatBackend: Send + Sync {
    /// Send one request and parse the reply against `request.format`.
    fn parse(
        &self,
        request: ParseRequest<'_>,
    ) -> impl Future<Output = Result<ParsedResponse>> + Send;
}
