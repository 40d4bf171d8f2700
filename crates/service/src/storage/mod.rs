//! Storage abstractions for the student store
//!
//! The store reads the whole collection at the start of an operation and
//! rewrites it after a mutation; adapters only need to move the full list.
//! Callers serialize access; adapters hold no operation-level lock.

use async_trait::async_trait;
use models::Student;

use crate::errors::ServiceError;

pub mod json_file_store;
pub mod memory;

pub use json_file_store::JsonFileStorage;
pub use memory::MemoryStorage;

/// Persistence port for the student collection.
/// Implementations can be file-backed, in-memory, or remote.
#[async_trait]
pub trait StudentStorage: Send + Sync {
    /// Full current collection. Missing or unreadable data yields an empty list.
    async fn read(&self) -> Vec<Student>;
    /// Replace the full collection.
    async fn write(&self, students: &[Student]) -> Result<(), ServiceError>;
}
