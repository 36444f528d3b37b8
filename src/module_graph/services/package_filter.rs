use crate::shared::error::ModWhyError;
use std::cell::Cell;

/// Maximum number of exclude patterns
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// PackageFilter - Drops modules from the graph before it is built
///
/// Supports wildcard patterns using '*' to match zero or more characters,
/// e.g. `golang.org/x/*` or `*/internal/*`. Matching is case-sensitive.
/// An empty filter matches nothing.
#[derive(Debug, Default)]
pub struct PackageFilter {
    patterns: Vec<ExcludePattern>,
}

impl PackageFilter {
    /// Creates a new PackageFilter from raw pattern strings
    ///
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern format (length, characters, wildcard-only)
    pub fn new(patterns: Vec<String>) -> Result<Self, ModWhyError> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            return Err(ModWhyError::Validation {
                message: format!(
                    "Too many exclusion patterns: {} (maximum: {})",
                    patterns.len(),
                    MAX_EXCLUDE_PATTERNS
                ),
            });
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Checks if a module name matches any exclusion pattern
    pub fn matches(&self, module_name: &str) -> bool {
        // Evaluate every pattern so each one records whether it was used
        self.patterns
            .iter()
            .fold(false, |hit, p| p.matches(module_name) || hit)
    }

    /// Patterns that have not matched any module so far
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.clone())
            .collect()
    }
}

/// A single exclusion pattern with its compiled matcher
#[derive(Debug)]
struct ExcludePattern {
    original: String,
    matcher: PatternMatcher,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self, ModWhyError> {
        validate_pattern(&pattern)?;
        let matcher = PatternMatcher::compile(&pattern);

        Ok(Self {
            original: pattern,
            matcher,
            matched: Cell::new(false),
        })
    }

    fn matches(&self, module_name: &str) -> bool {
        let is_match = self.matcher.matches(module_name);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }
}

#[derive(Debug)]
enum PatternMatcher {
    /// "golang.org/x/net"
    Exact(String),
    /// "*/v2"
    EndsWith(String),
    /// "golang.org/x/*"
    StartsWith(String),
    /// "*internal*"
    Contains(String),
    /// "github.com/*/errors*": literal parts in order, anchored where the
    /// pattern does not begin/end with '*'
    Parts {
        parts: Vec<String>,
        anchor_start: bool,
        anchor_end: bool,
    },
}

impl PatternMatcher {
    fn compile(pattern: &str) -> Self {
        let anchor_start = !pattern.starts_with('*');
        let anchor_end = !pattern.ends_with('*');
        let parts: Vec<String> = pattern
            .split('*')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        match (parts.len(), anchor_start, anchor_end) {
            (1, true, true) => PatternMatcher::Exact(parts[0].clone()),
            (1, false, true) => PatternMatcher::EndsWith(parts[0].clone()),
            (1, true, false) => PatternMatcher::StartsWith(parts[0].clone()),
            (1, false, false) => PatternMatcher::Contains(parts[0].clone()),
            _ => PatternMatcher::Parts {
                parts,
                anchor_start,
                anchor_end,
            },
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => name == s,
            PatternMatcher::EndsWith(s) => name.ends_with(s.as_str()),
            PatternMatcher::StartsWith(s) => name.starts_with(s.as_str()),
            PatternMatcher::Contains(s) => name.contains(s.as_str()),
            PatternMatcher::Parts {
                parts,
                anchor_start,
                anchor_end,
            } => {
                let Some((first, rest)) = parts.split_first() else {
                    return false;
                };
                let Some((last, middle)) = rest.split_last() else {
                    return false;
                };

                let mut remaining = name;
                if *anchor_start {
                    match remaining.strip_prefix(first.as_str()) {
                        Some(r) => remaining = r,
                        None => return false,
                    }
                } else {
                    match remaining.find(first.as_str()) {
                        Some(pos) => remaining = &remaining[pos + first.len()..],
                        None => return false,
                    }
                }

                for part in middle {
                    match remaining.find(part.as_str()) {
                        Some(pos) => remaining = &remaining[pos + part.len()..],
                        None => return false,
                    }
                }

                if *anchor_end {
                    remaining.ends_with(last.as_str())
                } else {
                    remaining.contains(last.as_str())
                }
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<(), ModWhyError> {
    let invalid = |message: String| Err(ModWhyError::Validation { message });

    if pattern.is_empty() {
        return invalid("Exclusion pattern cannot be empty".to_string());
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        return invalid(format!(
            "Exclusion pattern is too long: {} chars. Maximum: {} chars",
            pattern.len(),
            MAX_PATTERN_LENGTH
        ));
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        return invalid(format!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only module path characters (alphanumeric, '-', '_', '.', '/', '~', '+', '!') and '*' are allowed.",
            ch, pattern
        ));
    }

    if pattern.chars().all(|c| c == '*') {
        return invalid(format!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        ));
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '~' | '+' | '!' | '*')
}
