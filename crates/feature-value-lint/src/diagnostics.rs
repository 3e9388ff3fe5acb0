use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
        }
    }
}

/// An error annotation over the byte range `from..to` of the linted text.
///
/// A zero-length range (`from == to`) marks a point, e.g. where parsing
/// stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub from: usize,
    pub to: usize,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(from: usize, to: usize, message: impl Into<String>) -> Self {
        Self {
            from,
            to,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Length of the annotated range in bytes.
    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_like_an_editor_diagnostic() -> anyhow::Result<()> {
        let diagnostic = Diagnostic::error(3, 7, "Floats are not supported");
        assert_eq!(
            serde_json::to_value(&diagnostic)?,
            serde_json::json!({
                "from": 3,
                "to": 7,
                "message": "Floats are not supported",
                "severity": "error",
            })
        );
        Ok(())
    }

    #[test]
    fn zero_length_range_is_empty() {
        assert!(Diagnostic::error(4, 4, "here").is_empty());
        assert_eq!(Diagnostic::error(4, 9, "here").len(), 5);
    }
}
