use regex::{Regex, RegexBuilder};

use crate::config::{MatchMode, SearchRequest};
use crate::errors::{SearchError, SearchResult};

/// Strategy for counting matches in a line
#[derive(Debug, Clone)]
enum MatchStrategy {
    /// Plain substring scan. The needle is lower-cased once at compile
    /// time when folding case; each line is folded the same way.
    Literal {
        needle: String,
        case_insensitive: bool,
    },
    /// Compiled regex; case folding is baked into the compilation.
    Regex(Regex),
}

/// Counts non-overlapping occurrences of one pattern within a line.
///
/// A matcher is compiled once per request, so pattern errors surface here,
/// before any file is opened. Counting is a pure function of the line.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    strategy: MatchStrategy,
}

impl LineMatcher {
    /// Compiles the matcher for a request's pattern, mode and case policy.
    ///
    /// Fails with [`SearchError::EmptyPattern`] for a zero-length literal
    /// (a zero-length needle would match at every cursor position and
    /// never advance) and [`SearchError::PatternCompile`] for a malformed
    /// regex.
    pub fn compile(request: &SearchRequest) -> SearchResult<Self> {
        Self::new(&request.pattern, request.mode, request.case_insensitive)
    }

    pub fn new(pattern: &str, mode: MatchMode, case_insensitive: bool) -> SearchResult<Self> {
        let strategy = match mode {
            MatchMode::Literal => {
                if pattern.is_empty() {
                    return Err(SearchError::EmptyPattern);
                }
                let needle = if case_insensitive {
                    pattern.to_lowercase()
                } else {
                    pattern.to_string()
                };
                MatchStrategy::Literal {
                    needle,
                    case_insensitive,
                }
            }
            MatchMode::Regex => {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(case_insensitive)
                    .build()
                    .map_err(|e| SearchError::pattern_compile(pattern, e))?;
                MatchStrategy::Regex(regex)
            }
        };
        Ok(LineMatcher { strategy })
    }

    /// Counts non-overlapping occurrences of the pattern in `line`.
    ///
    /// Literal mode advances the cursor past each hit, so "aa" occurs once
    /// in "aaa". Regex mode counts the matches of a find-all scan.
    pub fn count(&self, line: &str) -> usize {
        match &self.strategy {
            MatchStrategy::Literal {
                needle,
                case_insensitive,
            } => {
                if *case_insensitive {
                    line.to_lowercase().match_indices(needle.as_str()).count()
                } else {
                    line.match_indices(needle.as_str()).count()
                }
            }
            MatchStrategy::Regex(regex) => regex.find_iter(line).count(),
        }
    }
}
