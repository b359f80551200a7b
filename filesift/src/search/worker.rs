use rayon::{ThreadPool, ThreadPoolBuilder};
use std::cell::Cell;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tracing::debug;

use super::engine::search;
use crate::config::SearchRequest;
use crate::errors::{SearchError, SearchResult};
use crate::results::ResultSet;

/// Identifier for a submitted request.
///
/// Ids are unique and monotonically increasing per engine. Completion order
/// across concurrent submissions is not guaranteed to follow submission
/// order, so callers that only care about the latest request compare ids
/// and discard stale outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "request-{}", self.0)
    }
}

/// Handle to one in-flight search.
///
/// Exactly one terminal outcome is delivered per submission: the result
/// set on success, or a human-readable message on failure. The handle is
/// fused: once the outcome has been taken, further polls report nothing
/// pending. There is no cancellation; dropping the handle lets the search
/// run to completion with its outcome discarded.
pub struct Submission {
    id: RequestId,
    rx: Receiver<Result<ResultSet, String>>,
    delivered: Cell<bool>,
}

impl Submission {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Blocks until the search finishes and consumes the outcome.
    pub fn wait(self) -> Result<ResultSet, String> {
        if self.delivered.get() {
            return Err("search outcome already delivered".to_string());
        }
        self.rx
            .recv()
            .unwrap_or_else(|_| Err("search worker disconnected".to_string()))
    }

    /// Non-blocking poll; `None` while the search is still running, and
    /// `None` again on every poll after the outcome has been taken. A
    /// worker that dies before sending anything yields one disconnected
    /// error, then `None`.
    pub fn try_recv(&self) -> Option<Result<ResultSet, String>> {
        if self.delivered.get() {
            return None;
        }
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.delivered.set(true);
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.delivered.set(true);
                Some(Err("search worker disconnected".to_string()))
            }
        }
    }
}

/// Runs searches on an owned worker pool so the submitting thread stays
/// responsive.
///
/// Submission is fire-and-forget: it returns immediately and the scan runs
/// on a pool worker. Each engine owns its pool; nothing is shared between
/// engines or between searches beyond the read-only filesystem. Excess
/// submissions queue in the pool.
pub struct SearchEngine {
    pool: ThreadPool,
    next_id: AtomicU64,
}

impl SearchEngine {
    /// Creates an engine with one worker per CPU core.
    pub fn new() -> SearchResult<Self> {
        Self::with_thread_count(NonZeroUsize::new(num_cpus::get().max(1)).unwrap())
    }

    /// Creates an engine with an explicit worker count.
    pub fn with_thread_count(threads: NonZeroUsize) -> SearchResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .thread_name(|i| format!("filesift-worker-{}", i))
            .build()
            .map_err(SearchError::ThreadPool)?;
        Ok(SearchEngine {
            pool,
            next_id: AtomicU64::new(0),
        })
    }

    /// Runs a search on the calling thread, inside the engine's pool.
    pub fn search(&self, request: &SearchRequest) -> SearchResult<ResultSet> {
        self.pool.install(|| search(request))
    }

    /// Submits a search and returns immediately with a channel-backed
    /// handle. Exactly one outcome is eventually delivered on the handle.
    pub fn submit(&self, request: SearchRequest) -> Submission {
        let id = self.allocate_id();
        let (tx, rx) = mpsc::channel();
        debug!("Submitting {} for {}", id, request.root.display());
        self.pool.spawn(move || {
            let outcome = search(&request).map_err(|e| e.to_string());
            // The caller may have dropped the handle; a failed send just
            // discards the outcome.
            let _ = tx.send(outcome);
        });
        Submission {
            id,
            rx,
            delivered: Cell::new(false),
        }
    }

    /// Submits a search with callback delivery: exactly one of the two
    /// callbacks runs, on a pool worker, when the search terminates.
    pub fn submit_with<S, E>(&self, request: SearchRequest, on_success: S, on_error: E) -> RequestId
    where
        S: FnOnce(ResultSet) + Send + 'static,
        E: FnOnce(String) + Send + 'static,
    {
        let id = self.allocate_id();
        debug!("Submitting {} for {}", id, request.root.display());
        self.pool.spawn(move || match search(&request) {
            Ok(results) => on_success(results),
            Err(e) => on_error(e.to_string()),
        });
        id
    }

    fn allocate_id(&self) -> RequestId {
        RequestId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}
