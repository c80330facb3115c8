//! Functions whose body is a chat model.
//!
//! Declare a function by its name, parameters and docstring, pick a return
//! type, and each call turns into one structured-output request: the
//! docstring and the resolved arguments become the prompt, the return type
//! becomes the response schema, and the model's answer comes back as a
//! value of that type.
//!
//! # Overview
//!
//! - **Signature**: declared parameters with optional defaults. Each call's
//!   positional and keyword arguments are resolved against it.
//! - **Prompt**: the docstring followed by one `name: value` line per
//!   argument.
//! - **ResponseSchema**: the return type's JSON schema, or a one-field
//!   `{"response": T}` wrapper for types without named fields.
//! - **Settings**: the slot holding the chat client, created on first use
//!   and shared by every function built against it.
//!
//! # Example
//!
//! ```no_run
//! use docgpt::{CallArgs, LlmFunction, ReasonedAnswer};
//!
//! # async fn example() -> docgpt::Result<()> {
//! let format_date = LlmFunction::<String>::builder("format_date")
//!     .doc("Format the date as yyyy-mm-dd")
//!     .param("date")
//!     .build()?;
//!
//! let date = format_date
//!     .call(CallArgs::new().arg("December 9, 1992."))
//!     .await?;
//! println!("{date}"); // 1992-12-09
//!
//! let capital = LlmFunction::<ReasonedAnswer<String>>::builder("capital_of")
//!     .doc("Name the capital city of the country.")
//!     .param("country")
//!     .build()?;
//!
//! let answer = capital
//!     .call(CallArgs::new().arg("Australia").gpt_model("gpt-4o"))
//!     .await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

mod args;
mod error;
mod function;
mod prompt;
mod reasoned;
mod schema;
mod settings;
mod signature;

pub use args::{CallArgs, GPT_MODEL, GPT_SYSTEM_PROMPT};
pub use error::{Error, Result};
pub use function::{DEFAULT_MODEL, FunctionBuilder, LlmFunction};
pub use prompt::{SYSTEM_INSTRUCTION, generate_prompt, system_prompt};
pub use reasoned::ReasonedAnswer;
pub use schema::ResponseSchema;
pub use settings::Settings;
pub use signature::{Param, ResolvedArgs, Signature};

pub use llm::{ChatBackend, OpenAiBackend, OpenAiConfig};
