use anyhow::Result;
use nimbus_analysis::{TableLabel, metrics_for};

/// Run the `metrics` command: print the table's metrics as JSON.
pub fn run(table: TableLabel) -> Result<()> {
    let json = serde_json::to_string_pretty(metrics_for(table))?;
    println!("{json}");
    Ok(())
}
