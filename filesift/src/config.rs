use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the search pattern is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Pattern is an exact substring.
    Literal,
    /// Pattern is compiled as a regular expression.
    Regex,
}

impl Default for MatchMode {
    fn default() -> Self {
        MatchMode::Literal
    }
}

/// A fully-specified search request.
///
/// A request is immutable once constructed and completely determines the
/// behavior of a search: there are no hidden defaults beyond the ones
/// applied by [`SearchRequest::new`] (literal mode, recursive,
/// case-insensitive). Every search re-reads the filesystem; nothing is
/// cached between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Root directory to start the search from.
    pub root: PathBuf,

    /// File-name suffix filter, e.g. ".txt" or "rs". An empty string
    /// selects all files.
    #[serde(default)]
    pub extension: String,

    /// The pattern to look for.
    pub pattern: String,

    /// Whether `pattern` is a literal substring or a regular expression.
    #[serde(default)]
    pub mode: MatchMode,

    /// Descend into subdirectories (unbounded depth) when true; scan only
    /// the root's direct children when false.
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Fold case before matching. Folded into regex compilation for regex
    /// mode; applied per codepoint for literal mode.
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

fn default_true() -> bool {
    true
}

impl SearchRequest {
    /// Creates a request with the default mode and flags: literal pattern,
    /// recursive traversal, case-insensitive, all file extensions.
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        SearchRequest {
            root: root.into(),
            extension: String::new(),
            pattern: pattern.into(),
            mode: MatchMode::Literal,
            recursive: true,
            case_insensitive: true,
        }
    }

    /// Builder method to restrict candidates to file names ending with
    /// the given suffix.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder method to set the pattern interpretation mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method to enable or disable descent into subdirectories.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Builder method to set case sensitivity.
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }
}
