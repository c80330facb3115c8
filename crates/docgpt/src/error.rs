//! Error types for model-backed functions.

use thiserror::Error;

/// Errors raised by a model-backed function call.
///
/// Argument errors are caller mistakes and are detected before any request
/// is made. Provider failures pass through unchanged as
/// [`Error::ExternalService`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Too many positional arguments, or a keyword the function does not
    /// declare.
    #[error("argument mismatch: {0}")]
    ArgumentMismatch(String),

    /// A required parameter has neither a supplied value nor a default.
    #[error("missing argument: {0}")]
    MissingArgument(String),

    /// The chat backend failed (network, auth, refusal, schema mismatch).
    #[error(transparent)]
    ExternalService(#[from] llm::Error),

    /// The function declaration itself is unusable.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// No response schema could be derived for the return type.
    #[error("invalid response schema: {0}")]
    InvalidSchema(String),

    /// A client was injected after the settings slot was already filled.
    #[error("client already initialized")]
    ClientAlreadySet,

    /// The runtime for a blocking call could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
