//! Include/exclude filtering of clean route paths.

use std::sync::LazyLock;

use regex::Regex;

/// Default inclusion pattern: markdown and component route files.
pub static DEFAULT_INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(md|svelte)$").unwrap());

/// Regex-based path filter applied to `/`-prefixed clean file paths.
///
/// An empty include list falls back to [`DEFAULT_INCLUDE_RE`]; exclusion
/// always wins over inclusion.
#[derive(Debug, Default, Clone)]
pub struct FileFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl FileFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, regex::Error> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        let included = if self.include.is_empty() {
            DEFAULT_INCLUDE_RE.is_match(path)
        } else {
            self.include.iter().any(|re| re.is_match(path))
        };
        included && !self.exclude.iter().any(|re| re.is_match(path))
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|pattern| Regex::new(pattern)).collect()
}
