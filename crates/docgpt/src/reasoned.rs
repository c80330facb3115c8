use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A result paired with the model's explanation of how it got there.
///
/// Use it as the return type of an [`LlmFunction`](crate::LlmFunction) to
/// get the rationale alongside the answer. `reasoning` comes first in the
/// schema so the model writes it before committing to a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReasonedAnswer<T> {
    pub reasoning: String,
    pub result: T,
}

impl<T: fmt::Display> fmt::Display for ReasonedAnswer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\nmodel reasoning: {}", self.result, self.reasoning)
    }
}
