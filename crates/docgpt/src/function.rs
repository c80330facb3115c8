//! Functions whose body is a chat model.

use crate::args::CallArgs;
use crate::prompt::{generate_prompt, system_prompt};
use crate::schema::ResponseSchema;
use crate::settings::Settings;
use crate::signature::{Param, Signature};
use crate::{Error, Result};
use llm::{ChatBackend, Message, OpenAiBackend, ParseRequest};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Model used when neither the function nor the call names one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const GENERATED_NOTE: &str = "\
Function auto-generated by docgpt.
- The execution happens on a chat model, and may require an API key.
- Answers can change between calls; their quality and validity are not guaranteed.
- The following auto-added parameters control the model call:

gpt_model: str
    The model to use. Defaults to gpt-4o-mini, which is faster and cheaper
    than larger models, but its answers can be less good.

gpt_system_prompt: Optional[str]
    Additional instructions placed before the default system prompt.";

/// Builder for an [`LlmFunction`].
#[derive(Debug)]
pub struct FunctionBuilder<T> {
    name: String,
    doc: Option<String>,
    params: Vec<Param>,
    model: String,
    output: PhantomData<fn() -> T>,
}

impl<T: JsonSchema + DeserializeOwned> FunctionBuilder<T> {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
            model: DEFAULT_MODEL.to_string(),
            output: PhantomData,
        }
    }

    /// Task description sent to the model ahead of the arguments.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Declare a required parameter.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param::required(name));
        self
    }

    /// Declare a parameter with a default value.
    pub fn param_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push(Param::with_default(name, default));
        self
    }

    /// Default model for this function; `gpt_model` still overrides it.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build against the process-wide OpenAI settings.
    pub fn build(self) -> Result<LlmFunction<T, OpenAiBackend>> {
        self.build_with(Settings::global())
    }

    /// Build against explicit settings.
    pub fn build_with<B: ChatBackend>(self, settings: Arc<Settings<B>>) -> Result<LlmFunction<T, B>> {
        let signature = Signature::new(self.name, self.params)?;
        let schema = ResponseSchema::of::<T>()?;
        Ok(LlmFunction {
            signature,
            doc: self.doc,
            model: self.model,
            schema,
            settings,
            output: PhantomData,
        })
    }
}

/// A function declared by signature and docstring and answered by a chat
/// model, returning `T`.
///
/// ```no_run
/// use docgpt::{CallArgs, LlmFunction};
///
/// # async fn example() -> docgpt::Result<()> {
/// let format_date = LlmFunction::<String>::builder("format_date")
///     .doc("Format the date as yyyy-mm-dd")
///     .param("date")
///     .build()?;
///
/// let date = format_date.call(CallArgs::new().arg("December 9, 1992.")).await?;
/// assert_eq!(date, "1992-12-09");
/// # Ok(())
/// # }
/// ```
pub struct LlmFunction<T = String, B = OpenAiBackend> {
    signature: Signature,
    doc: Option<String>,
    model: String,
    schema: ResponseSchema,
    settings: Arc<Settings<B>>,
    output: PhantomData<fn() -> T>,
}

impl<T: JsonSchema + DeserializeOwned> LlmFunction<T> {
    pub fn builder(name: impl Into<String>) -> FunctionBuilder<T> {
        FunctionBuilder::new(name)
    }
}

impl<T, B> LlmFunction<T, B>
where
    T: JsonSchema + DeserializeOwned,
    B: ChatBackend,
{
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn schema(&self) -> &ResponseSchema {
        &self.schema
    }

    /// The docstring followed by a note on how the function runs.
    pub fn help(&self) -> String {
        match self.doc.as_deref() {
            Some(doc) if !doc.trim().is_empty() => format!("{doc}\n\n{GENERATED_NOTE}"),
            _ => GENERATED_NOTE.to_string(),
        }
    }

    /// The user prompt a call with `args` would send.
    pub fn prompt_for(&self, args: CallArgs) -> Result<String> {
        let (positional, keywords, _) = args.into_parts()?;
        let resolved = self.signature.resolve(positional, keywords)?;
        Ok(generate_prompt(self.doc.as_deref(), &resolved))
    }

    /// Ask the model and convert its answer to `T`.
    pub async fn call(&self, args: CallArgs) -> Result<T> {
        let (positional, keywords, options) = args.into_parts()?;
        let resolved = self.signature.resolve(positional, keywords)?;
        let prompt = generate_prompt(self.doc.as_deref(), &resolved);

        let messages = [
            Message::system(system_prompt(options.system_prompt.as_deref())),
            Message::user(prompt),
        ];
        let model = options.model.as_deref().unwrap_or(&self.model);

        let client = self.settings.client()?;
        debug!(
            function = self.signature.name(),
            model,
            schema = %self.schema.format().name,
            wrapped = self.schema.is_wrapped(),
            "calling model"
        );

        let parsed = client
            .parse(ParseRequest {
                model,
                messages: &messages,
                format: self.schema.format(),
            })
            .await?;

        self.schema
            .extract(parsed.value)
            .map_err(|e| Error::ExternalService(llm::Error::Schema(e.to_string())))
    }

    /// Like [`call`](Self::call), blocking the current thread.
    ///
    /// Runs on a private single-threaded runtime, so it must not be used
    /// from inside an async context.
    pub fn call_blocking(&self, args: CallArgs) -> Result<T> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.call(args))
    }
}

impl<T, B> std::fmt::Debug for LlmFunction<T, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmFunction")
            .field("signature", &self.signature)
            .field("model", &self.model)
            .field("schema", &self.schema.format().name)
            .finish()
    }
}
