use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::matcher::LineMatcher;
use super::processor::FileProcessor;
use crate::config::SearchRequest;
use crate::errors::{SearchError, SearchResult};
use crate::filters::matches_extension;
use crate::results::ResultSet;

// Files per rayon chunk, clamped to keep chunking overhead low while still
// balancing load across workers.
const MIN_CHUNK_SIZE: usize = 16;
const MAX_CHUNK_SIZE: usize = 256;

/// Performs a search across files under the request's root directory.
///
/// Fatal problems (missing root, bad pattern) are returned before any file
/// is opened. Per-file read failures are logged and the file is skipped;
/// they never fail the request.
pub fn search(request: &SearchRequest) -> SearchResult<ResultSet> {
    info!(
        "Starting search for {:?} under {}",
        request.pattern,
        request.root.display()
    );

    if !request.root.is_dir() {
        return Err(SearchError::invalid_root(&request.root));
    }

    // Compile before touching any file so pattern errors surface first.
    let matcher = LineMatcher::compile(request)?;
    let processor = FileProcessor::new(matcher);

    let files = collect_candidates(request);
    debug!("Found {} candidate files", files.len());

    // Scan candidates in parallel. Chunk order is preserved by collect, so
    // entries come out in traversal order.
    let chunk_size = (files.len() / rayon::current_num_threads().max(1))
        .clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);

    let counts: Vec<(PathBuf, usize)> = files
        .par_chunks(chunk_size)
        .flat_map(|chunk| {
            chunk
                .iter()
                .filter_map(|path| match processor.count_matches(path) {
                    Ok(count) => Some((path.clone(), count)),
                    Err(e) => {
                        warn!("skipping {}: {}", path.display(), e);
                        None
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let mut results = ResultSet::new();
    for (path, count) in counts {
        results.add_file(path, count);
    }

    info!(
        "Search complete. Found {} matches in {} of {} files",
        results.total_matches,
        results.files_with_matches(),
        results.files_searched
    );

    Ok(results)
}

/// Enumerates candidate files under the root, honoring the traversal mode
/// and the extension filter. Entries are sorted per directory so traversal
/// is deterministic for a fixed filesystem state.
fn collect_candidates(request: &SearchRequest) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(&request.root);
    builder
        .standard_filters(false)
        .hidden(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    if !request.recursive {
        builder.max_depth(Some(1));
    }

    builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| matches_extension(entry.path(), &request.extension))
        .map(|entry| entry.into_path())
        .collect()
}
