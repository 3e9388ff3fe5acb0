//! Syntax tree of a JSON document with source locations.
//!
//! Parsing is delegated to `jsonc-parser` with every extension disabled, so
//! only strict JSON is accepted. Its byte ranges are converted into 1-based
//! line/column [`Location`]s against the document's [`Text`].

use jsonc_parser::ast;
use serde_json::Value;

use crate::error::LintError;
use crate::text::{Position, Text};

/// Start and (exclusive) end of a node in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Object(ObjectNode),
    Array(ArrayNode),
    Literal(LiteralNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub children: Vec<PropertyNode>,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    pub key: KeyNode,
    pub value: SyntaxNode,
}

/// A property name, including its quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNode {
    pub value: String,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNode {
    pub children: Vec<SyntaxNode>,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    pub value: LiteralValue,
    /// The literal as written in the source.
    pub raw: String,
    pub loc: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// The node a path resolved to. `key` is set when the last step of the path
/// was an object property.
#[derive(Debug, Clone, Copy)]
pub struct FoundNode<'a> {
    pub value: &'a SyntaxNode,
    pub key: Option<&'a KeyNode>,
}

impl SyntaxNode {
    pub fn loc(&self) -> &Location {
        match self {
            Self::Object(node) => &node.loc,
            Self::Array(node) => &node.loc,
            Self::Literal(node) => &node.loc,
        }
    }

    /// Structural node type: `Object`, `Array` or `Literal`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "Object",
            Self::Array(_) => "Array",
            Self::Literal(_) => "Literal",
        }
    }

    /// Type name used when the node is reported as a value: the scalar type
    /// for literals (`null`, `boolean`, `number`, `string`) and the structural
    /// type otherwise.
    pub fn value_type_name(&self) -> &'static str {
        match self {
            Self::Literal(literal) => match literal.value {
                LiteralValue::Null => "null",
                LiteralValue::Boolean(_) => "boolean",
                LiteralValue::Number(_) => "number",
                LiteralValue::String(_) => "string",
            },
            _ => self.type_name(),
        }
    }

    /// Walk `path` from this node, matching object children by key and array
    /// children by index.
    ///
    /// Returns `None` if a segment names a missing property, is not a valid
    /// index, or descends into a literal.
    pub fn find_node<S: AsRef<str>>(&self, path: &[S]) -> Option<FoundNode<'_>> {
        let Some((first, rest)) = path.split_first() else {
            return Some(FoundNode {
                value: self,
                key: None,
            });
        };
        match self {
            Self::Object(object) => {
                let child = object
                    .children
                    .iter()
                    .find(|child| child.key.value == first.as_ref())?;
                if rest.is_empty() {
                    Some(FoundNode {
                        value: &child.value,
                        key: Some(&child.key),
                    })
                } else {
                    child.value.find_node(rest)
                }
            }
            Self::Array(array) => {
                let index: usize = first.as_ref().parse().ok()?;
                array.children.get(index)?.find_node(rest)
            }
            Self::Literal(_) => None,
        }
    }
}

/// A syntax error at a 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub raw_message: String,
}

fn parse_options() -> jsonc_parser::ParseOptions {
    jsonc_parser::ParseOptions {
        allow_comments: false,
        allow_loose_object_property_names: false,
        allow_trailing_commas: false,
        allow_single_quoted_strings: false,
        allow_hexadecimal_numbers: false,
        allow_missing_commas: false,
        allow_unary_plus_numbers: false,
    }
}

/// Parse the document into a syntax tree.
///
/// # Errors
///
/// Returns a [`ParseError`] located at the first offending token, or at the
/// end of the document if it contains no value.
pub fn parse(text: &Text<'_>) -> Result<SyntaxNode, ParseError> {
    let parsed = jsonc_parser::parse_to_ast(
        text.as_str(),
        &jsonc_parser::CollectOptions::default(),
        &parse_options(),
    )
    .map_err(|e| {
        let pos = text.position_at(e.range().start);
        ParseError {
            line: pos.line,
            column: pos.column,
            raw_message: e.kind().to_string(),
        }
    })?;

    let Some(value) = parsed.value else {
        let pos = text.position_at(text.len());
        return Err(ParseError {
            line: pos.line,
            column: pos.column,
            raw_message: "Unexpected end of input".to_string(),
        });
    };
    Ok(convert(&value, text))
}

/// Parse the document into a `serde_json::Value` with the same options as
/// [`parse`].
///
/// # Errors
///
/// Returns [`LintError::Reparse`] if the document is not valid JSON. Callers
/// only use this after [`parse`] succeeded, so an error means the two parses
/// disagree.
pub fn parse_value(content: &str) -> Result<Value, LintError> {
    jsonc_parser::parse_to_serde_value(content, &parse_options())
        .map_err(|e| LintError::Reparse {
            message: e.to_string(),
        })?
        .ok_or_else(|| LintError::Reparse {
            message: "document contains no value".to_string(),
        })
}

fn location(text: &Text<'_>, start: usize, end: usize) -> Location {
    Location {
        start: text.position_at(start),
        end: text.position_at(end),
    }
}

fn literal(text: &Text<'_>, value: LiteralValue, start: usize, end: usize) -> SyntaxNode {
    SyntaxNode::Literal(LiteralNode {
        value,
        raw: text.as_str()[start..end].to_string(),
        loc: location(text, start, end),
    })
}

fn convert(value: &ast::Value<'_>, text: &Text<'_>) -> SyntaxNode {
    match value {
        ast::Value::Object(object) => SyntaxNode::Object(ObjectNode {
            children: object
                .properties
                .iter()
                .map(|prop| {
                    let (start, end) = match &prop.name {
                        ast::ObjectPropName::String(s) => (s.range.start, s.range.end),
                        ast::ObjectPropName::Word(w) => (w.range.start, w.range.end),
                    };
                    PropertyNode {
                        key: KeyNode {
                            value: prop.name.as_str().to_string(),
                            loc: location(text, start, end),
                        },
                        value: convert(&prop.value, text),
                    }
                })
                .collect(),
            loc: location(text, object.range.start, object.range.end),
        }),
        ast::Value::Array(array) => SyntaxNode::Array(ArrayNode {
            children: array
                .elements
                .iter()
                .map(|element| convert(element, text))
                .collect(),
            loc: location(text, array.range.start, array.range.end),
        }),
        ast::Value::StringLit(s) => literal(
            text,
            LiteralValue::String(s.value.to_string()),
            s.range.start,
            s.range.end,
        ),
        ast::Value::NumberLit(n) => literal(
            text,
            // The parser already checked the number grammar; out-of-range
            // values parse to infinity.
            LiteralValue::Number(n.value.parse().unwrap_or(f64::NAN)),
            n.range.start,
            n.range.end,
        ),
        ast::Value::BooleanLit(b) => literal(
            text,
            LiteralValue::Boolean(b.value),
            b.range.start,
            b.range.end,
        ),
        ast::Value::NullKeyword(n) => literal(text, LiteralValue::Null, n.range.start, n.range.end),
    }
}
