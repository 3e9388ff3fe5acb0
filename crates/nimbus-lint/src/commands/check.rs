use anyhow::{Context, Result};
use feature_value_lint::SchemaLinter;
use tracing::debug;

use crate::CheckArgs;
use crate::reporters::{LintedFile, make_reporter};

/// Run the `check` command. Returns `true` if the value has diagnostics.
pub fn run(args: &CheckArgs) -> Result<bool> {
    let config = super::load_config()?;
    let schema_path = super::schema_path(args.schema.as_deref(), &config)?;
    let schema = super::read_schema(&schema_path)?;
    let linter = SchemaLinter::new(&schema)
        .with_context(|| format!("invalid schema {}", schema_path.display()))?;
    debug!(schema = %schema_path.display(), draft = %linter.draft(), "loaded schema");

    let content = super::read_value(&args.file)?;
    let mut diagnostics = linter
        .lint(&content)
        .with_context(|| format!("failed to lint {}", args.file.display()))?;
    if args.sort || config.sort() {
        diagnostics.sort_by_key(|d| (d.from, d.to));
    }

    let file = LintedFile {
        path: args.file.display().to_string(),
        content,
        diagnostics,
    };
    let mut reporter = make_reporter(args.reporter.unwrap_or(config.reporter()));
    reporter.report(&file)?;

    Ok(!file.diagnostics.is_empty())
}
