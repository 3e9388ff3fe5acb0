#![doc = include_str!("../README.md")]
#![allow(unused_assignments)] // thiserror derive macros trigger false positives

pub mod complete;
pub mod cursor;
pub mod diagnostics;
pub mod draft;
pub mod error;
pub mod floats;
pub mod lint;
pub mod syntax;
pub mod text;
pub mod validator;

pub use complete::{Completion, CompletionResult, SchemaAutocomplete, schema_autocomplete};
pub use diagnostics::{Diagnostic, Severity};
pub use draft::{SchemaDraft, detect_draft};
pub use error::LintError;
pub use lint::SchemaLinter;
pub use text::Text;
pub use validator::{JsonSchemaValidator, SchemaValidator, ValidatorError};
