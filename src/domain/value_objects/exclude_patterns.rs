//! Exclude patterns value object
//!
//! Source-set filters written in gitignore syntax (`**/controller/**`,
//! `*.orig`). Patterns are matched against paths relative to each root.

use std::fmt;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Maximum number of patterns per descriptor
const MAX_PATTERNS: usize = 1000;

#[derive(Debug, Clone)]
pub struct ExcludePatterns {
    matcher: Gitignore,
    patterns: Vec<String>,
}

impl Default for ExcludePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl ExcludePatterns {
    /// An empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            patterns: Vec::new(),
        }
    }

    pub fn from_patterns(patterns: &[String]) -> Result<Self, ExcludeError> {
        if patterns.len() > MAX_PATTERNS {
            return Err(ExcludeError::TooManyPatterns {
                count: patterns.len(),
                limit: MAX_PATTERNS,
            });
        }

        let mut builder = GitignoreBuilder::new("");
        let mut kept = Vec::new();
        for pattern in patterns {
            let trimmed = pattern.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            builder
                .add_line(None, trimmed)
                .map_err(|e| ExcludeError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            kept.push(trimmed.to_string());
        }

        let matcher = builder
            .build()
            .map_err(|e| ExcludeError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            patterns: kept,
        })
    }

    /// Check if a root-relative path is excluded.
    pub fn is_excluded(&self, rel_path: &Path, is_dir: bool) -> bool {
        if self.patterns.is_empty() || rel_path.has_root() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ExcludeError {
    TooManyPatterns { count: usize, limit: usize },
    InvalidPattern { pattern: String, message: String },
    BuildFailed(String),
}

impl fmt::Display for ExcludeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyPatterns { count, limit } => {
                write!(f, "{} exclude patterns exceeds the {} limit", count, limit)
            }
            Self::InvalidPattern { pattern, message } => {
                write!(f, "invalid exclude pattern '{}': {}", pattern, message)
            }
            Self::BuildFailed(msg) => write!(f, "failed to build exclude matcher: {}", msg),
        }
    }
}

impl std::error::Error for ExcludeError {}
