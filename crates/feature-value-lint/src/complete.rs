use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::cursor;

/// The schema shape generated for a feature with a flat list of variables.
///
/// Keys other than `type` and `properties` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SimpleObjectSchema {
    #[serde(rename = "type")]
    pub kind: ObjectType,
    pub properties: IndexMap<String, SimpleProperty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ObjectType {
    #[serde(rename = "object")]
    Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleProperty {
    #[serde(rename = "type", default)]
    pub kind: Option<PrimitiveType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Integer,
    Boolean,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub label: String,
}

/// Completions to insert at byte offset `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionResult {
    pub from: usize,
    pub options: Vec<Completion>,
}

/// Completes the top-level property names of a [`SimpleObjectSchema`].
#[derive(Debug, Clone)]
pub struct SchemaAutocomplete {
    variables: Vec<String>,
}

/// Build an autocompletion provider for `schema`.
///
/// Returns `None` unless the schema has the [`SimpleObjectSchema`] shape; more
/// complex schemas get no completions at all.
pub fn schema_autocomplete(schema: &Value) -> Option<SchemaAutocomplete> {
    match SimpleObjectSchema::deserialize(schema) {
        Ok(simple) => Some(SchemaAutocomplete {
            variables: simple.properties.into_keys().collect(),
        }),
        Err(e) => {
            debug!(reason = %e, "schema is not a simple object, autocompletion disabled");
            None
        }
    }
}

impl SchemaAutocomplete {
    /// The property names offered, in schema order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Offer the schema's property names when `pos` is inside a property name
    /// of the top-level object.
    ///
    /// The completions start after the opening quote.
    #[tracing::instrument(skip_all, fields(pos = pos))]
    pub fn complete(&self, content: &str, pos: usize) -> Option<CompletionResult> {
        let token = cursor::token_at(content, pos)?;
        if !token.is_top_level_property_name() {
            return None;
        }
        Some(CompletionResult {
            from: token.from + 1,
            options: self
                .variables
                .iter()
                .map(|label| Completion {
                    label: label.clone(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(result: &CompletionResult) -> Vec<&str> {
        result.options.iter().map(|o| o.label.as_str()).collect()
    }

    fn provider() -> SchemaAutocomplete {
        schema_autocomplete(&json!({
            "type": "object",
            "properties": {
                "foo": {"type": "string"},
                "bar": {},
            },
        }))
        .expect("simple schema")
    }

    #[test]
    fn offers_properties_in_declaration_order() {
        let result = provider().complete(r#"{""}"#, 2).expect("completions");
        assert_eq!(result.from, 2);
        assert_eq!(labels(&result), ["foo", "bar"]);
    }

    #[test]
    fn anchors_after_the_opening_quote() {
        let content = "{\n  \"enabled\": true,\n  \"f";
        let result = provider()
            .complete(content, content.len())
            .expect("completions");
        assert_eq!(result.from, content.len() - 1);
    }

    #[test]
    fn nothing_two_levels_deep() {
        assert_eq!(provider().complete(r#"{"a": {""}}"#, 8), None);
    }

    #[test]
    fn nothing_in_values() {
        assert_eq!(provider().complete(r#"{"a": "x"}"#, 7), None);
        assert_eq!(provider().complete(r#"{"a": 12}"#, 7), None);
    }

    #[test]
    fn nothing_outside_tokens() {
        assert_eq!(provider().complete(r#"{ }"#, 1), None);
        assert_eq!(provider().complete("", 0), None);
    }

    #[test]
    fn extra_keywords_are_ignored() {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2019-09/schema",
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "count": {"type": "integer", "description": "How many"},
                "on": {"type": "boolean"},
            },
        });
        let provider = schema_autocomplete(&schema).expect("simple schema");
        assert_eq!(provider.variables(), ["count", "on"]);
    }

    #[test]
    fn complex_schemas_have_no_provider() {
        for schema in [
            json!({"type": "array"}),
            json!({"type": "object"}),
            json!({"type": "object", "properties": {"a": {"type": "number"}}}),
            json!({"type": "object", "properties": {"a": {"type": "object"}}}),
            json!({"type": "object", "properties": {"a": {"type": "array"}}}),
            json!({"type": "object", "properties": {"a": true}}),
            json!({"properties": {"a": {"type": "string"}}}),
        ] {
            assert!(schema_autocomplete(&schema).is_none(), "{schema}");
        }
    }
}
