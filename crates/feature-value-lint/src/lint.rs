use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::draft::{SchemaDraft, detect_draft};
use crate::error::LintError;
use crate::floats::report_float_values;
use crate::syntax::{self, SyntaxNode};
use crate::text::Text;
use crate::validator::{
    ADDITIONAL_PROPERTIES_KEYWORD, FALSE_BOOLEAN_SCHEMA, JsonSchemaValidator, SchemaValidator,
    ValidatorError, escape_pointer_segment, unescape_pointer_segment,
};

const TYPE_KEYWORD: &str = "type";

/// Messages that always come with a more specific error for the same problem.
const IGNORED_ERRORS: [&str; 5] = [
    "A subschema had errors.",
    "Instance does not match \"then\" schema.",
    "Instance does not match \"else\" schema.",
    "Instance does not match every subschema.",
    "Items did not match schema.",
];

/// Lints feature values against one schema.
pub struct SchemaLinter {
    draft: SchemaDraft,
    validator: Box<dyn SchemaValidator>,
}

impl core::fmt::Debug for SchemaLinter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SchemaLinter")
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

/// Which node of a resolved property a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Value,
    Key,
}

/// A validator error that survived filtering, ready to be positioned.
#[derive(Debug)]
struct Rendered {
    path: Vec<String>,
    message: String,
    target: Target,
}

impl SchemaLinter {
    /// Build a linter for `schema`, validating under the draft named by its
    /// `$schema`.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::SchemaCompile`] if the schema cannot be compiled.
    pub fn new(schema: &Value) -> Result<Self, LintError> {
        let draft = detect_draft(schema);
        let validator = JsonSchemaValidator::new(schema, draft)?;
        Ok(Self::with_validator(draft, validator))
    }

    /// Build a linter around an existing validator.
    pub fn with_validator(draft: SchemaDraft, validator: impl SchemaValidator + 'static) -> Self {
        Self {
            draft,
            validator: Box::new(validator),
        }
    }

    pub fn draft(&self) -> SchemaDraft {
        self.draft
    }

    /// Lint `content`.
    ///
    /// Problems with the text become diagnostics: syntax errors, a root that is
    /// not an object, schema violations and non-integer numbers.
    ///
    /// # Errors
    ///
    /// Returns an error only when a validator error cannot be mapped back onto
    /// the parsed document.
    #[tracing::instrument(skip_all, fields(draft = %self.draft, len = content.len()))]
    pub fn lint(&self, content: &str) -> Result<Vec<Diagnostic>, LintError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let text = Text::new(content);
        let root = match syntax::parse(&text) {
            Ok(root) => root,
            Err(err) => {
                debug!(line = err.line, column = err.column, "syntax error");
                let pos = text.document_position(err.line, err.column.saturating_sub(1))?;
                return Ok(vec![Diagnostic::error(pos, pos, err.raw_message)]);
            }
        };

        // Feature values must be objects.
        if !matches!(root, SyntaxNode::Object(_)) {
            return Ok(vec![Diagnostic::error(
                0,
                text.len(),
                format!("Expected a JSON Object, not {}", root.value_type_name()),
            )]);
        }

        let instance = syntax::parse_value(content)?;
        let errors = self.validator.validate(&instance);

        let mut diagnostics = Vec::with_capacity(errors.len());
        let mut type_errors = HashSet::new();
        for error in &errors {
            let Some(rendered) = render_error(error, &mut type_errors) else {
                debug!(
                    keyword = %error.keyword,
                    instance_location = %error.instance_location,
                    message = %error.message,
                    "suppressed validator error"
                );
                continue;
            };
            diagnostics.push(position(&text, &root, error, rendered)?);
        }

        diagnostics.extend(report_float_values(&text, &root)?);

        debug!(
            validator_errors = errors.len(),
            diagnostics = diagnostics.len(),
            "lint pass finished"
        );
        Ok(diagnostics)
    }
}

/// Decide whether a validator error is shown, and with which message and
/// target node.
///
/// `type_errors` holds the instance locations already covered by a specific
/// error during this pass.
fn render_error(error: &ValidatorError, type_errors: &mut HashSet<String>) -> Option<Rendered> {
    let message = error.message.as_str();

    // The failing property gets its own, more specific error.
    if is_property_schema_error(message) {
        return None;
    }

    let mut rendered = Rendered {
        path: instance_path(&error.instance_location),
        message: message.to_string(),
        target: Target::Value,
    };

    if error.keyword == TYPE_KEYWORD && !rendered.path.is_empty() {
        type_errors.insert(error.instance_location.clone());
    } else if error.keyword == ADDITIONAL_PROPERTIES_KEYWORD {
        if let Some(name) = unexpected_property(message) {
            // Reported on the object, not the property. Skip it if the
            // property already has a type error.
            let location = format!(
                "{}/{}",
                error.instance_location,
                escape_pointer_segment(name)
            );
            if !type_errors.insert(location) {
                return None;
            }
            rendered.path.push(name.to_string());
            rendered.message = format!("Unexpected property \"{name}\"");
            rendered.target = Target::Key;
        }
    } else if IGNORED_ERRORS.contains(&message)
        || (message == FALSE_BOOLEAN_SCHEMA && type_errors.contains(&error.instance_location))
    {
        return None;
    }

    Some(rendered)
}

fn position(
    text: &Text<'_>,
    root: &SyntaxNode,
    error: &ValidatorError,
    rendered: Rendered,
) -> Result<Diagnostic, LintError> {
    let unresolved = || LintError::UnresolvedPath {
        instance_location: error.instance_location.clone(),
    };
    let found = root.find_node(&rendered.path).ok_or_else(unresolved)?;
    let loc = match rendered.target {
        Target::Value => found.value.loc(),
        Target::Key => &found.key.ok_or_else(unresolved)?.loc,
    };
    let from = text.document_position(loc.start.line, loc.start.column - 1)?;
    let to = text.document_position(loc.end.line, loc.end.column - 1)?;
    Ok(Diagnostic::error(from, to, rendered.message))
}

/// Split an instance location into unescaped segments, dropping the root.
fn instance_path(location: &str) -> Vec<String> {
    location
        .split('/')
        .skip(1)
        .map(unescape_pointer_segment)
        .collect()
}

/// Matches `Property "..." does not match schema.`
fn is_property_schema_error(message: &str) -> bool {
    message
        .strip_prefix("Property \"")
        .is_some_and(|rest| rest.ends_with("\" does not match schema."))
}

/// The property name in `Property "X" does not match additional properties schema.`
fn unexpected_property(message: &str) -> Option<&str> {
    message
        .strip_prefix("Property \"")?
        .strip_suffix("\" does not match additional properties schema.")
}
