use std::io::Write;

use anyhow::Result;
use feature_value_lint::Text;

use super::{LintedFile, Reporter};

/// Text reporter: plain one-line-per-diagnostic output suitable for CI
/// pipelines and editors.
pub struct TextReporter<W> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "error" } else { "errors" }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, file: &LintedFile) -> Result<()> {
        let text = Text::new(&file.content);
        for diagnostic in &file.diagnostics {
            let start = text.position_at(diagnostic.from);
            writeln!(
                self.out,
                "{}: {}:{}:{}: {}",
                diagnostic.severity, file.path, start.line, start.column, diagnostic.message
            )?;
        }

        let count = file.diagnostics.len();
        if count > 0 {
            writeln!(self.out, "{count} {} found.", plural(count))?;
        } else {
            writeln!(self.out, "No errors.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::sample_file;

    fn render(file: &LintedFile) -> Result<String> {
        let mut out = Vec::new();
        TextReporter::new(&mut out).report(file)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn one_line_per_diagnostic() -> Result<()> {
        insta::assert_snapshot!(render(&sample_file())?, @r#"
        error: value.json:3:3: Unexpected property "typo"
        error: value.json:3:12: Floats are not supported
        2 errors found.
        "#);
        Ok(())
    }

    #[test]
    fn clean_file() -> Result<()> {
        let file = LintedFile {
            diagnostics: Vec::new(),
            ..sample_file()
        };
        assert_eq!(render(&file)?, "No errors.\n");
        Ok(())
    }
}
