pub mod config;
pub mod errors;
pub mod filters;
pub mod results;
pub mod search;

pub use config::{MatchMode, SearchRequest};
pub use errors::{SearchError, SearchResult};
pub use results::{FileMatch, ResultSet};
pub use search::engine::search;
pub use search::worker::{RequestId, SearchEngine, Submission};
