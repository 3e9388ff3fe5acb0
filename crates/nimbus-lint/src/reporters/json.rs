use std::io::Write;

use anyhow::Result;

use super::{LintedFile, Reporter};

/// JSON reporter: the diagnostics array, for editor integrations.
pub struct JsonReporter<W> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, file: &LintedFile) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &file.diagnostics)?;
        writeln!(self.out)?;
        Ok(())
    }
}
