//! Catalog load cycle.
//!
//! One complete attempt to fetch and render the event catalog, bounded by the
//! loading indicator: shown before the gateway call starts, hidden exactly
//! once after the cycle resolves, on success and on failure alike.
//!
//! Overlapping cycles are not deduplicated; a generation token makes the
//! latest cycle authoritative, so stale completions render nothing and do not
//! touch the indicator.

pub mod environment;
pub mod reducer;
pub mod types;

pub use environment::CatalogEnvironment;
pub use reducer::CatalogReducer;
pub use types::{CatalogAction, CatalogState, LOAD_FAILURE_NOTICE, LoadError};
