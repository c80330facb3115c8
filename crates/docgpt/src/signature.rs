//! Declared parameters and per-call argument resolution.

use crate::args::{GPT_MODEL, GPT_SYSTEM_PROMPT};
use crate::{Error, Result};
use serde_json::Value;

/// A declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub default: Option<Value>,
}

impl Param {
    /// A required parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// A parameter that falls back to `default` when not supplied.
    pub fn with_default(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

/// A function's name and ordered parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    params: Vec<Param>,
}

impl Signature {
    /// Create a signature, rejecting duplicate or reserved parameter names.
    pub fn new(name: impl Into<String>, params: Vec<Param>) -> Result<Self> {
        let name = name.into();
        for (i, param) in params.iter().enumerate() {
            if param.name == GPT_MODEL || param.name == GPT_SYSTEM_PROMPT {
                return Err(Error::InvalidSignature(format!(
                    "{name}() declares reserved parameter '{}'",
                    param.name
                )));
            }
            if params[..i].iter().any(|p| p.name == param.name) {
                return Err(Error::InvalidSignature(format!(
                    "{name}() declares parameter '{}' twice",
                    param.name
                )));
            }
        }
        Ok(Self { name, params })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Resolve one call's arguments against the declaration.
    ///
    /// Layers, lowest priority first: declared defaults, positional
    /// arguments in declaration order, keyword arguments by name.
    pub fn resolve(
        &self,
        positional: Vec<Value>,
        keywords: Vec<(String, Value)>,
    ) -> Result<ResolvedArgs> {
        if positional.len() > self.params.len() {
            return Err(Error::ArgumentMismatch(format!(
                "{}() takes {} positional arguments but {} were given",
                self.name,
                self.params.len(),
                positional.len()
            )));
        }

        let mut slots: Vec<Option<Value>> =
            self.params.iter().map(|p| p.default.clone()).collect();

        for (slot, value) in slots.iter_mut().zip(positional) {
            *slot = Some(value);
        }

        for (key, value) in keywords {
            let index = self
                .params
                .iter()
                .position(|p| p.name == key)
                .ok_or_else(|| {
                    Error::ArgumentMismatch(format!(
                        "{}() got an unexpected keyword argument '{key}'",
                        self.name
                    ))
                })?;
            slots[index] = Some(value);
        }

        let entries = self
            .params
            .iter()
            .zip(slots)
            .map(|(param, slot)| {
                slot.map(|value| (param.name.clone(), value)).ok_or_else(|| {
                    Error::MissingArgument(format!(
                        "{}() missing required argument '{}'",
                        self.name, param.name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ResolvedArgs { entries })
    }
}

/// Fully resolved arguments for one call, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedArgs {
    entries: Vec<(String, Value)>,
}

impl ResolvedArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signature() -> Signature {
        Signature::new(
            "describe",
            vec![
                Param::required("subject"),
                Param::required("audience"),
                Param::with_default("tone", "neutral"),
                Param::with_default("words", 50),
            ],
        )
        .unwrap()
    }

    fn kw(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn positional_and_keyword_resolve_identically() {
        let sig = signature();
        let by_position = sig
            .resolve(vec![json!("rust"), json!("kids")], Vec::new())
            .unwrap();
        let by_name = sig
            .resolve(
                Vec::new(),
                kw(&[("audience", json!("kids")), ("subject", json!("rust"))]),
            )
            .unwrap();

        assert_eq!(by_position, by_name);
        assert_eq!(by_position.get("tone"), Some(&json!("neutral")));
        assert_eq!(by_position.get("words"), Some(&json!(50)));
    }

    #[test]
    fn resolved_order_follows_declaration() {
        let resolved = signature()
            .resolve(
                Vec::new(),
                kw(&[
                    ("words", json!(10)),
                    ("audience", json!("kids")),
                    ("subject", json!("rust")),
                ]),
            )
            .unwrap();
        let names: Vec<&str> = resolved.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["subject", "audience", "tone", "words"]);
    }

    #[test]
    fn keywords_override_positionals_and_defaults() {
        let resolved = signature()
            .resolve(
                vec![json!("rust"), json!("kids"), json!("playful")],
                kw(&[("subject", json!("go")), ("words", json!(10))]),
            )
            .unwrap();

        assert_eq!(resolved.get("subject"), Some(&json!("go")));
        assert_eq!(resolved.get("tone"), Some(&json!("playful")));
        assert_eq!(resolved.get("words"), Some(&json!(10)));
        assert_eq!(resolved.len(), 4);
    }

    #[test]
    fn unknown_keyword_is_mismatch() {
        let err = signature()
            .resolve(
                vec![json!("rust"), json!("kids")],
                kw(&[("colour", json!("red"))]),
            )
            .unwrap_err();
        assert!(matches!(err, Error::ArgumentMismatch(ref m) if m.contains("'colour'")));
    }

    #[test]
    fn too_many_positionals_is_mismatch() {
        let args = (0..5).map(|i| json!(i)).collect();
        let err = signature().resolve(args, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::ArgumentMismatch(_)));
    }

    #[test]
    fn missing_required_argument() {
        let err = signature()
            .resolve(vec![json!("rust")], Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::MissingArgument(ref m) if m.contains("'audience'")));
    }

    #[test]
    fn empty_signature_resolves_to_nothing() {
        let sig = Signature::new("noop", Vec::new()).unwrap();
        assert!(sig.resolve(Vec::new(), Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn rejects_duplicate_and_reserved_names() {
        let err = Signature::new("f", vec![Param::required("a"), Param::required("a")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));

        let err = Signature::new("f", vec![Param::required("gpt_model")]).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));
    }
}
