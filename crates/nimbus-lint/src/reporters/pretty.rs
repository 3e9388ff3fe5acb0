use std::io::Write;

use anyhow::Result;
use feature_value_lint::Diagnostic;
use miette::{NamedSource, Report, SourceSpan};
use thiserror::Error;

use super::{LintedFile, Reporter};

/// A lint diagnostic with its source, rendered by miette.
#[derive(Debug, Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(nimbus::feature_value))]
pub struct FeatureValueDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    span: SourceSpan,
    message: String,
}

impl FeatureValueDiagnostic {
    pub fn new(file: &LintedFile, diagnostic: &Diagnostic) -> Self {
        Self {
            src: NamedSource::new(&file.path, file.content.clone()),
            span: (diagnostic.from, diagnostic.len()).into(),
            message: diagnostic.message.clone(),
        }
    }
}

/// Pretty reporter: miette output with the offending span underlined.
pub struct PrettyReporter<W> {
    out: W,
}

impl<W: Write> PrettyReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for PrettyReporter<W> {
    fn report(&mut self, file: &LintedFile) -> Result<()> {
        for diagnostic in &file.diagnostics {
            let report = Report::new(FeatureValueDiagnostic::new(file, diagnostic));
            writeln!(self.out, "{report:?}")?;
        }
        Ok(())
    }
}
