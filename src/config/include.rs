//! Include string parsing
//!
//! A raw include is either `pattern1,pattern2` (implicit working directory
//! source) or `@source/pattern1,pattern2` (explicit source).

use crate::error::{Result, config};

/// A parsed include entry, before the default source is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeSpec {
    /// Explicit source name, `None` when the include had no `@source/` prefix
    pub source: Option<String>,

    /// File patterns in declaration order, trimmed
    pub patterns: Vec<String>,
}

/// One resolved include: a single pattern to expand against a single source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub source: String,
    pub pattern: String,
}

/// Parse a raw include string into its source and pattern list
pub fn parse_include(raw: &str) -> Result<IncludeSpec> {
    let (source, list) = match raw.strip_prefix('@') {
        Some(rest) => {
            let (source, list) = rest.split_once('/').ok_or_else(|| {
                config::invalid_include(raw, "missing '/' after source name")
            })?;
            (Some(source.to_string()), list)
        }
        None => (None, raw),
    };

    let patterns = split_patterns(raw, list)?;
    Ok(IncludeSpec { source, patterns })
}

fn split_patterns(raw: &str, list: &str) -> Result<Vec<String>> {
    list.split(',')
        .map(str::trim)
        .map(|pattern| {
            if pattern.is_empty() {
                Err(config::invalid_include(raw, "empty file pattern"))
            } else {
                Ok(pattern.to_string())
            }
        })
        .collect()
}
