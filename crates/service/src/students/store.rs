use std::{path::PathBuf, sync::Arc};

use models::{NewStudent, Student, StudentPatch};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::{JsonFileStorage, MemoryStorage, StudentStorage};
use super::{StudentQuery, StudentStats};

/// Student record store over an injected storage port.
///
/// Every operation loads the full collection, computes, and (for mutations)
/// writes the full collection back. `lock` is held for that whole cycle, so
/// operations on one store never interleave.
pub struct StudentStore {
    storage: Arc<dyn StudentStorage>,
    lock: Mutex<()>,
}

impl StudentStore {
    pub fn new(storage: Arc<dyn StudentStorage>) -> Arc<Self> {
        Arc::new(Self { storage, lock: Mutex::new(()) })
    }

    /// Store persisted to the JSON file at `path`.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let storage = JsonFileStorage::new(path).await?;
        Ok(Self::new(storage))
    }

    pub fn in_memory() -> Arc<Self> {
        Self::new(MemoryStorage::new())
    }

    pub async fn create(&self, input: NewStudent) -> Result<Student, ServiceError> {
        input.validate()?;
        let _guard = self.lock.lock().await;
        let mut students = self.storage.read().await;
        ensure_unique_email(&students, input.email.trim(), None)?;
        let student = input.into_student();
        students.push(student.clone());
        self.storage.write(&students).await?;
        info!(id = %student.id, total = students.len(), "student created");
        Ok(student)
    }

    pub async fn get(&self, id: Uuid) -> Result<Student, ServiceError> {
        let _guard = self.lock.lock().await;
        self.storage
            .read()
            .await
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::not_found("student"))
    }

    /// Apply the supplied fields. Nothing is written if any check fails.
    pub async fn update(&self, id: Uuid, patch: StudentPatch) -> Result<Student, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut students = self.storage.read().await;
        let idx = students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ServiceError::not_found("student"))?;
        if patch.is_empty() {
            debug!(%id, "empty update; record unchanged");
            return Ok(students.swap_remove(idx));
        }
        patch.validate()?;
        if let Some(email) = patch.email() {
            ensure_unique_email(&students, email, Some(id))?;
        }
        patch.apply_to(&mut students[idx]);
        let updated = students[idx].clone();
        self.storage.write(&students).await?;
        info!(%id, "student updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let _guard = self.lock.lock().await;
        let mut students = self.storage.read().await;
        let idx = students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ServiceError::not_found("student"))?;
        students.remove(idx);
        self.storage.write(&students).await?;
        info!(%id, total = students.len(), "student deleted");
        Ok(())
    }

    /// Filtered, sorted, paginated view; never mutates the store.
    pub async fn list(&self, query: &StudentQuery) -> Result<Vec<Student>, ServiceError> {
        query.validate()?;
        let _guard = self.lock.lock().await;
        let students = self.storage.read().await;
        debug!(total = students.len(), ?query, "listing students");
        Ok(query.apply(students))
    }

    pub async fn stats(&self) -> StudentStats {
        let _guard = self.lock.lock().await;
        StudentStats::from_students(&self.storage.read().await)
    }

    /// Full collection in storage order.
    pub async fn all(&self) -> Vec<Student> {
        let _guard = self.lock.lock().await;
        self.storage.read().await
    }
}

fn ensure_unique_email(students: &[Student], email: &str, except: Option<Uuid>) -> Result<(), ServiceError> {
    let taken = students
        .iter()
        .any(|s| Some(s.id) != except && s.has_email(email));
    if taken {
        return Err(ServiceError::DuplicateEmail(email.to_string()));
    }
    Ok(())
}
