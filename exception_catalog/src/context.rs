//! Substitution context supplied alongside an error occurrence
//!
//! A context is turned into a flat name→text variable set before any
//! pattern is rendered. Structured values opt in explicitly, either by
//! implementing [`PatternVars`] or by being `Serialize`.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value;

/// Flat variable set used for substitution
pub type Variables = BTreeMap<String, String>;

/// Variable name a plain-text context is bound to
pub const TEXT_VARIABLE: &str = "text";

/// Explicit "to-variable-map" capability for structured context values
pub trait PatternVars {
    fn pattern_vars(&self) -> Variables;
}

impl PatternVars for Variables {
    fn pattern_vars(&self) -> Variables {
        self.clone()
    }
}

impl PatternVars for HashMap<String, String> {
    fn pattern_vars(&self) -> Variables {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Context value passed to `MessageResolver::resolve`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PatternContext {
    /// No context at all
    #[default]
    Absent,
    /// A plain string, bound as `${text}`
    Text(String),
    /// An explicit variable mapping, used verbatim
    Vars(Variables),
    /// Fields extracted from a structured value
    Object(Variables),
}

impl PatternContext {
    pub fn text(text: impl Into<String>) -> Self {
        PatternContext::Text(text.into())
    }

    pub fn vars<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        PatternContext::Vars(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Bind a value through its [`PatternVars`] implementation
    pub fn object<T: PatternVars + ?Sized>(value: &T) -> Self {
        PatternContext::Object(value.pattern_vars())
    }

    /// Bind the top-level fields of any `Serialize` value
    ///
    /// Strings bind verbatim, `null` binds as `"null"`, anything else binds
    /// as its JSON text. A scalar binds to `${text}`. A value that fails to
    /// serialize yields an empty variable set.
    pub fn serialized<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(Value::Object(fields)) => PatternContext::Object(
                fields
                    .into_iter()
                    .map(|(name, field)| (name, render_value(field)))
                    .collect(),
            ),
            Ok(Value::Null) => PatternContext::Absent,
            Ok(scalar) => {
                let mut vars = Variables::new();
                vars.insert(TEXT_VARIABLE.to_string(), render_value(scalar));
                PatternContext::Object(vars)
            }
            Err(e) => {
                log::debug!("Context value could not be serialized, binding no variables: {}", e);
                PatternContext::Object(Variables::new())
            }
        }
    }

    /// Plain-text payload, if this is a text context
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PatternContext::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Variable set derived from this context
    pub fn pattern_vars(&self) -> Variables {
        match self {
            PatternContext::Absent => Variables::new(),
            PatternContext::Text(text) => {
                let mut vars = Variables::new();
                vars.insert(TEXT_VARIABLE.to_string(), text.clone());
                vars
            }
            PatternContext::Vars(vars) | PatternContext::Object(vars) => vars.clone(),
        }
    }
}

fn render_value(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

impl From<&str> for PatternContext {
    fn from(text: &str) -> Self {
        PatternContext::Text(text.to_string())
    }
}

impl From<String> for PatternContext {
    fn from(text: String) -> Self {
        PatternContext::Text(text)
    }
}

impl From<Variables> for PatternContext {
    fn from(vars: Variables) -> Self {
        PatternContext::Vars(vars)
    }
}

impl From<HashMap<String, String>> for PatternContext {
    fn from(vars: HashMap<String, String>) -> Self {
        PatternContext::Vars(vars.into_iter().collect())
    }
}

impl<T: Into<PatternContext>> From<Option<T>> for PatternContext {
    fn from(value: Option<T>) -> Self {
        value.map_or(PatternContext::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Order {
        id: u64,
        owner: String,
        note: Option<String>,
        tags: Vec<String>,
    }

    struct Quota {
        used: u32,
        limit: u32,
    }

    impl PatternVars for Quota {
        fn pattern_vars(&self) -> Variables {
            let mut vars = Variables::new();
            vars.insert("used".into(), self.used.to_string());
            vars.insert("limit".into(), self.limit.to_string());
            vars
        }
    }

    #[test]
    fn test_absent_binds_nothing() {
        assert!(PatternContext::Absent.pattern_vars().is_empty());
        assert_eq!(PatternContext::from(None::<String>), PatternContext::Absent);
    }

    #[test]
    fn test_text_binds_text_variable() {
        let vars = PatternContext::from("disk full").pattern_vars();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get(TEXT_VARIABLE).map(String::as_str), Some("disk full"));
    }

    #[test]
    fn test_mapping_used_verbatim() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), "World".to_string());
        let context = PatternContext::from(map);

        assert_eq!(context, PatternContext::vars([("name", "World")]));
        assert_eq!(context.pattern_vars().get("name").map(String::as_str), Some("World"));
        assert_eq!(context.as_text(), None);
    }

    #[test]
    fn test_explicit_object_capability() {
        let vars = PatternContext::object(&Quota { used: 7, limit: 5 }).pattern_vars();
        assert_eq!(vars.get("used").map(String::as_str), Some("7"));
        assert_eq!(vars.get("limit").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_serialized_struct_fields() {
        let order = Order {
            id: 42,
            owner: "alice".into(),
            note: None,
            tags: vec!["a".into()],
        };
        let vars = PatternContext::serialized(&order).pattern_vars();

        assert_eq!(vars.get("id").map(String::as_str), Some("42"));
        assert_eq!(vars.get("owner").map(String::as_str), Some("alice"));
        assert_eq!(vars.get("note").map(String::as_str), Some("null"));
        assert_eq!(vars.get("tags").map(String::as_str), Some("[\"a\"]"));
    }

    #[test]
    fn test_serialized_scalar_binds_text() {
        let vars = PatternContext::serialized(&17).pattern_vars();
        assert_eq!(vars.get(TEXT_VARIABLE).map(String::as_str), Some("17"));
    }

    #[test]
    fn test_serialized_unit_is_absent() {
        assert_eq!(PatternContext::serialized(&()), PatternContext::Absent);
    }

    #[test]
    fn test_serialize_failure_binds_nothing() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], "non-string key".to_string());

        let context = PatternContext::serialized(&map);
        assert_eq!(context, PatternContext::Object(Variables::new()));
    }
}
