//! Concurrent file searching.
//!
//! The pipeline is: [`engine::search`] walks the tree and selects candidate
//! files, [`processor::FileProcessor`] scans each candidate line by line,
//! and [`matcher::LineMatcher`] counts occurrences within a single line.
//! [`worker::SearchEngine`] wraps the blocking search in an owned thread
//! pool for callers that must not block their own event loop.

pub mod engine;
pub mod matcher;
pub mod processor;
pub mod worker;

pub use engine::search;
pub use matcher::LineMatcher;
pub use processor::FileProcessor;
pub use worker::{RequestId, SearchEngine, Submission};
