use thiserror::Error;

/// Failures that are not problems with the linted text.
///
/// Mistakes in the text itself are always reported as
/// [`Diagnostic`](crate::Diagnostic)s. These errors mean the schema could not
/// be used at all, or that the parser and the validator disagree about the
/// document.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to compile schema: {message}")]
    SchemaCompile { message: String },

    #[error("line {line} is out of range (document has {lines} lines)")]
    LineOutOfRange { line: usize, lines: usize },

    #[error("instance location '{instance_location}' does not resolve to a syntax node")]
    UnresolvedPath { instance_location: String },

    #[error("document parsed into a syntax tree but not into a value: {message}")]
    Reparse { message: String },
}
