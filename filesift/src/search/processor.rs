use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{trace, warn};

use super::matcher::LineMatcher;
use crate::errors::{SearchError, SearchResult};

// Files below this are read in one call; anything larger goes through a
// buffered line loop.
const SMALL_FILE_THRESHOLD: u64 = 32 * 1024; // 32KB
const BUFFER_CAPACITY: usize = 65536;

/// Scans one candidate file and sums per-line match counts.
///
/// Decoding is permissive: bytes that are not valid UTF-8 are replaced
/// rather than aborting the scan, so a malformed file contributes a
/// degraded count instead of failing. I/O failures are returned as
/// [`SearchError::FileRead`] for the engine to log and skip.
#[derive(Debug)]
pub struct FileProcessor {
    matcher: LineMatcher,
}

impl FileProcessor {
    /// Creates a new FileProcessor with the given line matcher
    pub fn new(matcher: LineMatcher) -> Self {
        Self { matcher }
    }

    /// Counts matches in a file, choosing the read strategy by file size.
    pub fn count_matches(&self, path: &Path) -> SearchResult<usize> {
        trace!("Scanning file: {}", path.display());

        match path.metadata() {
            Ok(metadata) if metadata.len() < SMALL_FILE_THRESHOLD => self.count_whole_file(path),
            Ok(_) => self.count_buffered(path),
            Err(e) => {
                warn!("Failed to get metadata for {}: {}", path.display(), e);
                self.count_buffered(path)
            }
        }
    }

    /// Reads the whole file, then counts line by line.
    fn count_whole_file(&self, path: &Path) -> SearchResult<usize> {
        let bytes = std::fs::read(path).map_err(|e| SearchError::file_read(path, e))?;
        let contents = String::from_utf8_lossy(&bytes);
        if let std::borrow::Cow::Owned(_) = contents {
            warn!("Invalid UTF-8 replaced in {}", path.display());
        }
        Ok(contents.lines().map(|line| self.matcher.count(line)).sum())
    }

    /// Streams the file through a buffered reader, decoding each line
    /// independently so one bad line cannot poison the rest.
    fn count_buffered(&self, path: &Path) -> SearchResult<usize> {
        let file = File::open(path).map_err(|e| SearchError::file_read(path, e))?;
        let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);

        let mut total = 0;
        let mut buffer = Vec::with_capacity(256);
        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|e| SearchError::file_read(path, e))?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buffer);
            total += self.matcher.count(line.trim_end_matches(['\n', '\r']));
        }
        Ok(total)
    }
}
