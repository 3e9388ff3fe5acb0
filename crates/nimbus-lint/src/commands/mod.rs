pub mod check;
pub mod complete;
pub mod metrics;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use nimbus_lint_config::Config;
use serde_json::Value;

/// Load `nimbus-lint.toml` from the working directory, walking upward.
pub fn load_config() -> Result<Config> {
    nimbus_lint_config::load().context("failed to load nimbus-lint.toml")
}

/// The schema passed on the command line, or the one named by the config.
pub fn schema_path(cli: Option<&Path>, config: &Config) -> Result<PathBuf> {
    match cli.or(config.schema.as_deref()) {
        Some(path) => Ok(path.to_path_buf()),
        None => bail!("no schema given: pass --schema or set `schema` in nimbus-lint.toml"),
    }
}

/// Read and parse a JSON Schema document.
pub fn read_schema(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse schema {}", path.display()))
}

pub fn read_value(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_schema_wins() -> Result<()> {
        let config = Config {
            schema: Some(PathBuf::from("/config/feature.json")),
            ..Config::default()
        };
        assert_eq!(
            schema_path(Some(Path::new("cli.json")), &config)?,
            PathBuf::from("cli.json")
        );
        assert_eq!(
            schema_path(None, &config)?,
            PathBuf::from("/config/feature.json")
        );
        Ok(())
    }

    #[test]
    fn missing_schema_is_an_error() {
        assert!(schema_path(None, &Config::default()).is_err());
    }

    #[test]
    fn unreadable_schema_names_the_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("schema.json");
        fs::write(&path, "{ not json")?;
        let err = match read_schema(&path) {
            Ok(_) => bail!("expected a parse error"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("schema.json"));
        Ok(())
    }
}
