use crate::diagnostics::Diagnostic;
use crate::error::LintError;
use crate::syntax::{LiteralValue, SyntaxNode};
use crate::text::Text;

pub const FLOATS_NOT_SUPPORTED: &str = "Floats are not supported";

/// Report every number with a fractional part, depth first and in source
/// order.
///
/// Each diagnostic is a point at `document_position(line, column)` of the
/// literal's start. The column is the parser's 1-based column passed as-is,
/// unlike validator diagnostics which subtract one.
///
/// # Errors
///
/// Returns [`LintError::LineOutOfRange`] if a node's location does not belong
/// to `text`.
pub fn report_float_values(text: &Text<'_>, node: &SyntaxNode) -> Result<Vec<Diagnostic>, LintError> {
    match node {
        SyntaxNode::Array(array) => {
            let mut diagnostics = Vec::new();
            for child in &array.children {
                diagnostics.extend(report_float_values(text, child)?);
            }
            Ok(diagnostics)
        }
        SyntaxNode::Object(object) => {
            let mut diagnostics = Vec::new();
            for child in &object.children {
                diagnostics.extend(report_float_values(text, &child.value)?);
            }
            Ok(diagnostics)
        }
        SyntaxNode::Literal(literal) => match literal.value {
            LiteralValue::Number(n) if n.fract() != 0.0 || !n.is_finite() => {
                let start = literal.loc.start;
                let pos = text.document_position(start.line, start.column)?;
                Ok(vec![Diagnostic::error(pos, pos, FLOATS_NOT_SUPPORTED)])
            }
            _ => Ok(Vec::new()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax;

    fn floats(content: &str) -> anyhow::Result<Vec<usize>> {
        let text = Text::new(content);
        let root = syntax::parse(&text).map_err(|e| anyhow::anyhow!("{e:?}"))?;
        Ok(report_float_values(&text, &root)?
            .iter()
            .map(|d| {
                assert_eq!(d.message, FLOATS_NOT_SUPPORTED);
                assert_eq!(d.from, d.to);
                d.from
            })
            .collect())
    }

    #[test]
    fn integers_are_fine() -> anyhow::Result<()> {
        assert!(floats(r#"{"a": 1, "b": -3, "c": 1e3, "d": 2.0}"#)?.is_empty());
        Ok(())
    }

    #[test]
    fn point_is_one_past_the_literal_start() -> anyhow::Result<()> {
        // `1.5` starts at offset 6.
        assert_eq!(floats(r#"{"a": 1.5}"#)?, [7]);
        Ok(())
    }

    #[test]
    fn nested_floats_in_document_order() -> anyhow::Result<()> {
        let content = "{\n  \"z\": [0.5, 1, {\"y\": 2.25}],\n  \"a\": -0.1\n}";
        assert_eq!(floats(content)?, [11, 25, 40]);
        Ok(())
    }

    #[test]
    fn strings_that_look_like_floats_are_ignored() -> anyhow::Result<()> {
        assert!(floats(r#"{"a": "1.5", "1.5": true}"#)?.is_empty());
        Ok(())
    }

    #[test]
    fn out_of_range_numbers_are_reported() -> anyhow::Result<()> {
        assert_eq!(floats(r#"{"a": 1e400}"#)?, [7]);
        Ok(())
    }

    #[test]
    fn offsets_count_bytes() -> anyhow::Result<()> {
        // "é" is two bytes, so the literal starts at byte 7.
        assert_eq!(floats(r#"{"é": 1.5}"#)?, [8]);
        Ok(())
    }
}
