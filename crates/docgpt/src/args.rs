//! Call-time arguments, including the injected model options.

use crate::{Error, Result};
use serde_json::Value;

/// Keyword that selects the model for one call.
pub const GPT_MODEL: &str = "gpt_model";
/// Keyword that adds a caller system prompt for one call.
pub const GPT_SYSTEM_PROMPT: &str = "gpt_system_prompt";

/// Model options consumed by the wrapper and never seen by the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GptOptions {
    pub model: Option<String>,
    pub system_prompt: Option<String>,
}

/// Arguments for one call of a model-backed function.
///
/// ```
/// use docgpt::CallArgs;
///
/// let args = CallArgs::new()
///     .arg("December 9, 1992.")
///     .kwarg("style", "iso")
///     .gpt_model("gpt-4o");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    keywords: Vec<(String, Value)>,
    injected: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument. `gpt_model` and `gpt_system_prompt` are
    /// routed to the model options.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        if name == GPT_MODEL || name == GPT_SYSTEM_PROMPT {
            self.injected.push((name, value));
        } else {
            self.keywords.push((name, value));
        }
        self
    }

    /// Use `model` for this call instead of the function's default.
    pub fn gpt_model(self, model: impl Into<String>) -> Self {
        self.kwarg(GPT_MODEL, model.into())
    }

    /// Prepend `prompt` to the system prompt for this call.
    pub fn gpt_system_prompt(self, prompt: impl Into<String>) -> Self {
        self.kwarg(GPT_SYSTEM_PROMPT, prompt.into())
    }

    /// Split into positional arguments, keyword arguments and options.
    pub(crate) fn into_parts(self) -> Result<(Vec<Value>, Vec<(String, Value)>, GptOptions)> {
        let mut options = GptOptions::default();
        for (name, value) in self.injected {
            let value = match value {
                Value::String(s) => Some(s),
                Value::Null if name == GPT_SYSTEM_PROMPT => None,
                other => {
                    return Err(Error::ArgumentMismatch(format!(
                        "'{name}' must be a string, got {other}"
                    )));
                }
            };
            if name == GPT_MODEL {
                options.model = value;
            } else {
                options.system_prompt = value;
            }
        }
        Ok((self.positional, self.keywords, options))
    }
}
