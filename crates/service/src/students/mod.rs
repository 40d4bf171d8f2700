//! Student records: CRUD, list queries and aggregate stats.

pub mod query;
pub mod stats;
pub mod store;

pub use query::{SortField, SortOrder, StudentQuery};
pub use stats::StudentStats;
pub use store::StudentStore;
