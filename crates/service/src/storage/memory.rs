use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use models::Student;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use super::StudentStorage;

/// In-process student collection, for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Vec<Student>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_students(students: Vec<Student>) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(students), fail_writes: AtomicBool::new(false) })
    }

    /// Make every subsequent `write` fail with `ServiceError::Storage`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StudentStorage for MemoryStorage {
    async fn read(&self) -> Vec<Student> {
        self.inner.read().await.clone()
    }

    async fn write(&self, students: &[Student]) -> Result<(), ServiceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::Storage("memory storage is read-only".into()));
        }
        *self.inner.write().await = students.to_vec();
        Ok(())
    }
}
