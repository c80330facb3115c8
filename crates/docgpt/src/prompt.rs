//! Prompt text built from a docstring and resolved arguments.

use crate::signature::ResolvedArgs;
use serde_json::Value;

/// Instruction sent as the system message on every call.
pub const SYSTEM_INSTRUCTION: &str = "Answer using the provided output schema.";

/// Build the user prompt: the docstring, a blank line, then one
/// `name: value` line per argument in declaration order.
pub fn generate_prompt(doc: Option<&str>, args: &ResolvedArgs) -> String {
    let lines: Vec<String> = args
        .iter()
        .map(|(name, value)| format!("{name}: {}", render_value(value)))
        .collect();
    let listing = lines.join("\n");

    match doc.filter(|d| !d.trim().is_empty()) {
        Some(doc) if listing.is_empty() => doc.to_string(),
        Some(doc) => format!("{doc}\n\n{listing}"),
        None => listing,
    }
}

/// Build the system prompt, with the caller's text first when given.
pub fn system_prompt(extra: Option<&str>) -> String {
    match extra.filter(|e| !e.is_empty()) {
        Some(extra) => format!("{extra}\n{SYSTEM_INSTRUCTION}"),
        None => SYSTEM_INSTRUCTION.to_string(),
    }
}

// Strings go in as written; everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{Param, Signature};
    use serde_json::json;

    fn resolve(params: Vec<Param>, positional: Vec<Value>) -> ResolvedArgs {
        Signature::new("f", params)
            .unwrap()
            .resolve(positional, Vec::new())
            .unwrap()
    }

    #[test]
    fn docstring_then_arguments() {
        let args = resolve(
            vec![Param::required("date")],
            vec![json!("December 9, 1992.")],
        );
        assert_eq!(
            generate_prompt(Some("Format the date as yyyy-mm-dd"), &args),
            "Format the date as yyyy-mm-dd\n\ndate: December 9, 1992."
        );
    }

    #[test]
    fn non_string_values_render_as_json() {
        let args = resolve(
            vec![
                Param::required("age"),
                Param::required("tags"),
                Param::with_default("notes", Value::Null),
            ],
            vec![json!(30), json!(["fever", "cough"])],
        );
        assert_eq!(
            generate_prompt(None, &args),
            "age: 30\ntags: [\"fever\",\"cough\"]\nnotes: null"
        );
    }

    #[test]
    fn missing_docstring_lists_arguments_only() {
        let args = resolve(vec![Param::required("x")], vec![json!("1")]);
        assert_eq!(generate_prompt(None, &args), "x: 1");
        assert_eq!(generate_prompt(Some("   "), &args), "x: 1");
    }

    #[test]
    fn no_arguments_keeps_docstring_verbatim() {
        let args = ResolvedArgs::default();
        assert_eq!(
            generate_prompt(Some("Name a prime number.\n"), &args),
            "Name a prime number.\n"
        );
    }

    #[test]
    fn system_prompt_prefix() {
        assert_eq!(system_prompt(None), SYSTEM_INSTRUCTION);
        assert_eq!(system_prompt(Some("")), SYSTEM_INSTRUCTION);
        assert_eq!(
            system_prompt(Some("You are a pirate.")),
            "You are a pirate.\nAnswer using the provided output schema."
        );
    }
}
