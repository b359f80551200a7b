use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// The first three variants are fatal to a request and are reported before
/// any file is opened. `FileRead` is per-file: the engine logs it and moves
/// on to the next candidate, so it never crosses the engine boundary as a
/// request failure.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid root: {0} is not a directory")]
    InvalidRoot(PathBuf),
    #[error("Invalid regex pattern {pattern:?}: {source}")]
    PatternCompile {
        pattern: String,
        source: regex::Error,
    },
    #[error("Empty search pattern")]
    EmptyPattern,
    #[error("Could not read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SearchError {
    pub fn invalid_root(path: impl Into<PathBuf>) -> Self {
        Self::InvalidRoot(path.into())
    }

    pub fn pattern_compile(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::PatternCompile {
            pattern: pattern.into(),
            source,
        }
    }

    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// True for errors that abort the whole request rather than a single
    /// candidate file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::FileRead { .. })
    }
}
