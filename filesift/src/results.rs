use serde::Serialize;
use std::path::PathBuf;

/// Occurrence count for a single file. Only files with at least one match
/// are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMatch {
    /// The path to the file
    pub path: PathBuf,
    /// Total non-overlapping occurrences across all lines of the file
    pub count: usize,
}

/// The complete results of one search request.
///
/// Entries appear in traversal order and a path appears at most once. A
/// result set is built fresh per request and never cached; running the same
/// request against an unmodified tree yields an equal set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSet {
    /// Per-file counts, traversal order
    pub matches: Vec<FileMatch>,
    /// Total number of candidate files scanned, with or without matches
    pub files_searched: usize,
    /// Sum of counts over all matching files
    pub total_matches: usize,
}

impl ResultSet {
    /// Creates a new empty result set
    pub fn new() -> Self {
        Default::default()
    }

    /// Records one scanned file. Files with a zero count contribute to
    /// `files_searched` only.
    pub fn add_file(&mut self, path: PathBuf, count: usize) {
        self.files_searched += 1;
        if count > 0 {
            self.total_matches += count;
            self.matches.push(FileMatch { path, count });
        }
    }

    /// Number of files with at least one match
    pub fn files_with_matches(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Merges another result set into this one, preserving the other's
    /// entry order after this one's.
    pub fn merge(&mut self, other: ResultSet) {
        self.files_searched += other.files_searched;
        self.total_matches += other.total_matches;
        self.matches.extend(other.matches);
    }
}
