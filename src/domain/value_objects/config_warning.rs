//! Configuration warning value object.

use std::fmt;
use std::path::PathBuf;

/// Non-fatal problem found while loading `skein.toml` (e.g. an unknown key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the offending key (`application.0.entrypoint`)
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line, when the key can be located
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_and_suggestion() {
        let w = ConfigWarning {
            key: "entrypoint".to_string(),
            file: PathBuf::from("skein.toml"),
            line: Some(12),
            suggestion: Some("entry_point".to_string()),
        };
        assert_eq!(
            w.to_string(),
            "unknown key 'entrypoint' in skein.toml:12 (did you mean 'entry_point'?)"
        );
    }
}
