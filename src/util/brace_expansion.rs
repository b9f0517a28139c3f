//! Brace pattern expansion
//!
//! Expands patterns like `file{1,2}.txt` into multiple file names.
//! Supports comma lists, nested groups, numeric and character sequences,
//! and zero-padding based on the input format.
//!
//! # Examples
//!
//! ```
//! use newfile::util::brace_expansion::expand_braces;
//!
//! // Comma list
//! let names = expand_braces("src/{lib,main}.rs").unwrap();
//! assert_eq!(names, vec!["src/lib.rs", "src/main.rs"]);
//!
//! // Zero-padded sequence
//! let names = expand_braces("page{08..10}.md").unwrap();
//! assert_eq!(names, vec!["page08.md", "page09.md", "page10.md"]);
//! ```

use crate::file::error::{FileError, FileResult};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum number of names a single pattern may expand into
pub const MAX_EXPANSION: usize = 1000;

/// Regex pattern for matching `{start..end}` numeric sequences
static NUMERIC_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+)\.\.(-?\d+)$").expect("Invalid regex pattern")
});

/// Regex pattern for matching `{a..z}` character sequences
static CHAR_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z])\.\.([A-Za-z])$").expect("Invalid regex pattern")
});

/// Represents a parsed numeric sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericSequence {
    /// Start value of the sequence
    pub start: i64,
    /// End value of the sequence (inclusive)
    pub end: i64,
    /// Width for zero-padding (0 means no padding)
    pub width: usize,
}

impl NumericSequence {
    /// Format a number according to this sequence's padding
    pub fn format(&self, value: i64) -> String {
        if self.width > 0 {
            if value < 0 {
                format!("-{:0>width$}", value.unsigned_abs(), width = self.width - 1)
            } else {
                format!("{:0>width$}", value, width = self.width)
            }
        } else {
            value.to_string()
        }
    }

    /// Get the count of values in this sequence
    pub fn count(&self) -> u64 {
        self.start.abs_diff(self.end).saturating_add(1)
    }

    /// All values in order, counting down when `end < start`
    pub fn values(&self) -> Vec<String> {
        if self.start <= self.end {
            (self.start..=self.end).map(|n| self.format(n)).collect()
        } else {
            (self.end..=self.start).rev().map(|n| self.format(n)).collect()
        }
    }
}

/// Parse a numeric sequence from the body of a brace group (without braces)
pub fn parse_numeric_sequence(body: &str) -> Option<NumericSequence> {
    let captures = NUMERIC_SEQUENCE.captures(body)?;

    let start_str = captures.get(1)?.as_str();
    let end_str = captures.get(2)?.as_str();

    let start: i64 = start_str.parse().ok()?;
    let end: i64 = end_str.parse().ok()?;

    // Padding applies when either bound is written with a leading zero
    let is_padded = |s: &str| {
        let digits = s.trim_start_matches('-');
        digits.starts_with('0') && digits.len() > 1
    };
    let width = if is_padded(start_str) || is_padded(end_str) {
        start_str.len().max(end_str.len())
    } else {
        0
    };

    Some(NumericSequence { start, end, width })
}

fn char_sequence(body: &str) -> Option<Vec<String>> {
    let captures = CHAR_SEQUENCE.captures(body)?;
    let start = captures.get(1)?.as_str().chars().next()?;
    let end = captures.get(2)?.as_str().chars().next()?;

    let values = if start <= end {
        (start..=end).map(String::from).collect()
    } else {
        (end..=start).rev().map(String::from).collect()
    };
    Some(values)
}

/// Position of the `}` closing the group opened at `open`, if any
fn find_closing(pattern: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in pattern[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a group body on top-level commas
fn split_alternatives(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[last..i]);
                last = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[last..]);
    parts
}

/// Alternatives for a group body, or None if the group is literal
fn group_alternatives(body: &str) -> FileResult<Option<Vec<String>>> {
    if let Some(sequence) = parse_numeric_sequence(body) {
        if sequence.count() > MAX_EXPANSION as u64 {
            return Err(FileError::expansion(format!(
                "sequence {{{}}} yields {} names (max {})",
                body,
                sequence.count(),
                MAX_EXPANSION
            )));
        }
        return Ok(Some(sequence.values()));
    }

    if let Some(values) = char_sequence(body) {
        return Ok(Some(values));
    }

    let parts = split_alternatives(body);
    if parts.len() < 2 {
        return Ok(None);
    }

    let mut alternatives = Vec::new();
    for part in parts {
        alternatives.extend(expand_inner(part)?);
    }
    Ok(Some(alternatives))
}

fn expand_inner(pattern: &str) -> FileResult<Vec<String>> {
    let mut search_from = 0;

    while let Some(offset) = pattern[search_from..].find('{') {
        let open = search_from + offset;

        // An unmatched `{` is literal; later groups may still expand
        let Some(close) = find_closing(pattern, open) else {
            search_from = open + 1;
            continue;
        };

        let body = &pattern[open + 1..close];
        let Some(alternatives) = group_alternatives(body)? else {
            search_from = open + 1;
            continue;
        };

        let prefix = &pattern[..open];
        let suffixes = expand_inner(&pattern[close + 1..])?;

        let total = alternatives.len().saturating_mul(suffixes.len());
        if total > MAX_EXPANSION {
            return Err(FileError::expansion(format!(
                "pattern yields {} names (max {})",
                total, MAX_EXPANSION
            )));
        }

        let mut expanded = Vec::with_capacity(total);
        for alternative in &alternatives {
            for suffix in &suffixes {
                expanded.push(format!("{}{}{}", prefix, alternative, suffix));
            }
        }
        return Ok(expanded);
    }

    Ok(vec![pattern.to_string()])
}

/// Expand a pattern containing brace groups into multiple names
///
/// Returns a single-element vector with the original pattern if it has no
/// expandable group. Repeated names are dropped, keeping the first.
///
/// # Limits
///
/// - Maximum [`MAX_EXPANSION`] names per pattern
/// - Single-element groups like `{a}` and unbalanced braces are kept literally
pub fn expand_braces(pattern: &str) -> FileResult<Vec<String>> {
    let mut expanded = expand_inner(pattern)?;

    let mut seen = HashSet::new();
    expanded.retain(|name| seen.insert(name.clone()));

    tracing::debug!("Expanded {:?} into {} name(s)", pattern, expanded.len());
    Ok(expanded)
}
