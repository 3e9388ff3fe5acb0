use anyhow::Result;
use feature_value_lint::schema_autocomplete;
use tracing::debug;

use crate::CompleteArgs;

/// Run the `complete` command: print one completion label per line.
pub fn run(args: &CompleteArgs) -> Result<()> {
    let config = super::load_config()?;
    let schema = super::read_schema(&super::schema_path(args.schema.as_deref(), &config)?)?;
    let content = super::read_value(&args.file)?;

    let Some(provider) = schema_autocomplete(&schema) else {
        return Ok(());
    };
    let Some(result) = provider.complete(&content, args.offset) else {
        debug!(offset = args.offset, "no completions at cursor");
        return Ok(());
    };
    for option in &result.options {
        println!("{}", option.label);
    }
    Ok(())
}
