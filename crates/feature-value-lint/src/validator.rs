use jsonschema::error::ValidationErrorKind;
use serde_json::Value;

use crate::draft::SchemaDraft;
use crate::error::LintError;

pub(crate) const ADDITIONAL_PROPERTIES_KEYWORD: &str = "additionalProperties";
pub(crate) const FALSE_SCHEMA_KEYWORD: &str = "false";
pub(crate) const FALSE_BOOLEAN_SCHEMA: &str = "False boolean schema.";

/// One error reported by a [`SchemaValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorError {
    /// Schema keyword that failed, e.g. `type` or `additionalProperties`.
    pub keyword: String,
    /// JSON pointer into the instance; empty for the root.
    pub instance_location: String,
    pub message: String,
}

impl ValidatorError {
    pub fn new(
        keyword: impl Into<String>,
        instance_location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            instance_location: instance_location.into(),
            message: message.into(),
        }
    }
}

/// Validates an instance against a schema fixed at construction time.
///
/// Errors are returned in the order the validator found them. The linter's
/// de-duplication depends on that order.
pub trait SchemaValidator: Send + Sync {
    fn validate(&self, instance: &Value) -> Vec<ValidatorError>;
}

/// Resolves every external `$ref` to the permissive `true` schema.
///
/// Schemas are compiled without touching the filesystem or the network.
struct NoopRetriever;

impl jsonschema::Retrieve for NoopRetriever {
    fn retrieve(
        &self,
        _uri: &jsonschema::Uri<String>,
    ) -> Result<Value, Box<dyn core::error::Error + Send + Sync>> {
        Ok(Value::Bool(true))
    }
}

/// [`SchemaValidator`] backed by the `jsonschema` crate.
pub struct JsonSchemaValidator {
    validator: jsonschema::Validator,
}

impl JsonSchemaValidator {
    /// Compile `schema` under `draft`. Unknown keywords are ignored and
    /// external references accept any value.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::SchemaCompile`] if the schema is not a valid
    /// schema for the draft.
    #[tracing::instrument(skip_all, fields(%draft))]
    pub fn new(schema: &Value, draft: SchemaDraft) -> Result<Self, LintError> {
        let validator = jsonschema::options()
            .with_draft(draft.into())
            .with_retriever(NoopRetriever)
            .build(schema)
            .map_err(|e| LintError::SchemaCompile {
                message: e.to_string(),
            })?;
        Ok(Self { validator })
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, instance: &Value) -> Vec<ValidatorError> {
        let mut errors = Vec::new();
        for error in self.validator.iter_errors(instance) {
            let instance_location = error.instance_path().to_string();
            match error.kind() {
                // Reported once per object, listing every rejected property.
                // Split it into the parent error and the false-schema failure
                // of each property.
                ValidationErrorKind::AdditionalProperties { unexpected } => {
                    for name in unexpected {
                        errors.push(ValidatorError::new(
                            ADDITIONAL_PROPERTIES_KEYWORD,
                            instance_location.clone(),
                            format!(
                                "Property \"{name}\" does not match additional properties schema."
                            ),
                        ));
                        errors.push(ValidatorError::new(
                            FALSE_SCHEMA_KEYWORD,
                            format!("{instance_location}/{}", escape_pointer_segment(name)),
                            FALSE_BOOLEAN_SCHEMA,
                        ));
                    }
                }
                ValidationErrorKind::FalseSchema => {
                    errors.push(ValidatorError::new(
                        FALSE_SCHEMA_KEYWORD,
                        instance_location,
                        FALSE_BOOLEAN_SCHEMA,
                    ));
                }
                kind => {
                    errors.push(ValidatorError::new(
                        kind.keyword(),
                        instance_location,
                        error.to_string(),
                    ));
                }
            }
        }
        tracing::trace!(count = errors.len(), "validated instance");
        errors
    }
}

/// Escape a property name for use as a JSON pointer segment.
pub(crate) fn escape_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

pub(crate) fn unescape_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(schema: &Value, instance: &Value) -> anyhow::Result<Vec<ValidatorError>> {
        let validator = JsonSchemaValidator::new(schema, SchemaDraft::default())?;
        Ok(validator.validate(instance))
    }

    #[test]
    fn valid_instance_has_no_errors() -> anyhow::Result<()> {
        let schema = json!({"type": "object", "properties": {"a": {"type": "integer"}}});
        assert!(validate(&schema, &json!({"a": 1}))?.is_empty());
        Ok(())
    }

    #[test]
    fn type_errors_carry_keyword_and_location() -> anyhow::Result<()> {
        let schema = json!({"type": "object", "properties": {"a": {"type": "integer"}}});
        let errors = validate(&schema, &json!({"a": "x"}))?;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].keyword, "type");
        assert_eq!(errors[0].instance_location, "/a");
        Ok(())
    }

    #[test]
    fn additional_properties_are_split_per_property() -> anyhow::Result<()> {
        let schema = json!({
            "type": "object",
            "properties": {"a": {"type": "integer"}},
            "additionalProperties": false,
        });
        let errors = validate(&schema, &json!({"a": 1, "b": 2}))?;
        assert_eq!(
            errors,
            [
                ValidatorError::new(
                    "additionalProperties",
                    "",
                    "Property \"b\" does not match additional properties schema."
                ),
                ValidatorError::new("false", "/b", "False boolean schema."),
            ]
        );
        Ok(())
    }

    #[test]
    fn false_schema_property() -> anyhow::Result<()> {
        let schema = json!({"properties": {"gone": false}});
        let errors = validate(&schema, &json!({"gone": 1}))?;
        assert_eq!(
            errors,
            [ValidatorError::new("false", "/gone", "False boolean schema.")]
        );
        Ok(())
    }

    #[test]
    fn uncompilable_schema_is_an_error() {
        let schema = json!({"type": 12});
        assert!(matches!(
            JsonSchemaValidator::new(&schema, SchemaDraft::Draft2020_12),
            Err(LintError::SchemaCompile { .. })
        ));
    }

    #[test]
    fn keywords_come_from_the_failing_validator() -> anyhow::Result<()> {
        let schema = json!({
            "type": "object",
            "required": ["a"],
            "properties": {
                "n": {"minimum": 3},
                "e": {"enum": ["x"]},
            },
        });
        let errors = validate(&schema, &json!({"n": 1, "e": "y"}))?;
        let mut keywords: Vec<(&str, &str)> = errors
            .iter()
            .map(|e| (e.instance_location.as_str(), e.keyword.as_str()))
            .collect();
        keywords.sort_unstable();
        assert_eq!(
            keywords,
            [("", "required"), ("/e", "enum"), ("/n", "minimum")]
        );
        Ok(())
    }

    #[test]
    fn external_file_refs_are_not_read() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("integer.json");
        std::fs::write(&target, r#"{"type": "integer"}"#)?;
        let schema = json!({
            "type": "object",
            "properties": {"a": {"$ref": format!("file://{}", target.display())}},
        });
        assert!(validate(&schema, &json!({"a": "x"}))?.is_empty());
        Ok(())
    }

    #[test]
    fn external_http_refs_are_not_fetched() -> anyhow::Result<()> {
        let schema = json!({
            "type": "object",
            "properties": {"a": {"$ref": "http://127.0.0.1:9/integer.json"}},
        });
        assert!(validate(&schema, &json!({"a": "x"}))?.is_empty());
        Ok(())
    }

    #[test]
    fn pointer_segments_round_trip() {
        let name = "a/b~c";
        let escaped = escape_pointer_segment(name);
        assert_eq!(escaped, "a~1b~0c");
        assert_eq!(unescape_pointer_segment(&escaped), name);
    }
}
