use serde_json::Value;

/// JSON Schema dialect a feature schema is validated under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaDraft {
    /// `http://json-schema.org/draft-04/schema#`
    Draft4,
    /// `http://json-schema.org/draft-07/schema#`
    Draft7,
    /// `https://json-schema.org/draft/2019-09/schema`
    #[default]
    Draft2019_09,
    /// `https://json-schema.org/draft/2020-12/schema`
    Draft2020_12,
}

impl SchemaDraft {
    /// Short dialect tag, e.g. `"4"` or `"2019-09"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft4 => "4",
            Self::Draft7 => "7",
            Self::Draft2019_09 => "2019-09",
            Self::Draft2020_12 => "2020-12",
        }
    }
}

impl core::fmt::Display for SchemaDraft {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SchemaDraft> for jsonschema::Draft {
    fn from(draft: SchemaDraft) -> Self {
        match draft {
            SchemaDraft::Draft4 => jsonschema::Draft::Draft4,
            SchemaDraft::Draft7 => jsonschema::Draft::Draft7,
            SchemaDraft::Draft2019_09 => jsonschema::Draft::Draft201909,
            SchemaDraft::Draft2020_12 => jsonschema::Draft::Draft202012,
        }
    }
}

/// Detect the draft from the root `$schema` keyword.
///
/// Only the four canonical meta-schema URIs are recognized. Anything else,
/// including a missing `$schema`, selects draft 2019-09.
pub fn detect_draft(schema: &Value) -> SchemaDraft {
    match schema.get("$schema").and_then(Value::as_str) {
        Some("http://json-schema.org/draft-04/schema#") => SchemaDraft::Draft4,
        Some("http://json-schema.org/draft-07/schema#") => SchemaDraft::Draft7,
        Some("https://json-schema.org/draft/2020-12/schema") => SchemaDraft::Draft2020_12,
        _ => SchemaDraft::Draft2019_09,
    }
}
