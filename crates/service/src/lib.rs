//! Service layer for the student registry.
//! - `students::StudentStore` owns validation, uniqueness and query logic.
//! - `storage` holds the persistence port and its JSON-file/in-memory adapters.
//! - Errors are reported through `errors::ServiceError`.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod pagination;
pub mod students;
