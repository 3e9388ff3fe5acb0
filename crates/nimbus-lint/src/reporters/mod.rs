pub mod json;
pub mod pretty;
pub mod text;

use anyhow::Result;
use feature_value_lint::Diagnostic;
use nimbus_lint_config::ReporterKind;

pub use json::JsonReporter;
pub use pretty::PrettyReporter;
pub use text::TextReporter;

/// A linted feature value and its diagnostics.
#[derive(Debug)]
pub struct LintedFile {
    pub path: String,
    pub content: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Formats and outputs the diagnostics of a linted file.
pub trait Reporter {
    fn report(&mut self, file: &LintedFile) -> Result<()>;
}

pub fn make_reporter(kind: ReporterKind) -> Box<dyn Reporter> {
    match kind {
        ReporterKind::Text => Box::new(TextReporter::new(std::io::stderr())),
        ReporterKind::Json => Box::new(JsonReporter::new(std::io::stdout())),
        ReporterKind::Pretty => Box::new(PrettyReporter::new(std::io::stderr())),
    }
}

#[cfg(test)]
pub(crate) fn sample_file() -> LintedFile {
    let content = "{\n  \"enabled\": true,\n  \"typo\": 1.5\n}\n".to_string();
    LintedFile {
        path: "value.json".into(),
        diagnostics: vec![
            Diagnostic::error(23, 29, "Unexpected property \"typo\""),
            Diagnostic::error(32, 32, "Floats are not supported"),
        ],
        content,
    }
}
