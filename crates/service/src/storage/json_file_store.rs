use std::{ffi::OsString, io::ErrorKind, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::Student;
use tokio::fs;
use tracing::{error, warn};

use crate::errors::ServiceError;
use super::StudentStorage;

/// JSON file-backed student collection.
///
/// The file holds one pretty-printed JSON array. Writes go to a sibling
/// `.tmp` file which is then renamed over the original.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    file_path: PathBuf,
}

impl JsonFileStorage {
    /// Point the adapter at `path`, creating its parent directory. The file
    /// itself is created on first write.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
        }
        Ok(Arc::new(Self { file_path }))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self.file_path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl StudentStorage for JsonFileStorage {
    async fn read(&self) -> Vec<Student> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "cannot read student file; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice::<Vec<Student>>(&bytes) {
            Ok(students) => students,
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "student file is not a valid student array; treating as empty");
                Vec::new()
            }
        }
    }

    async fn write(&self, students: &[Student]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(students).map_err(|e| ServiceError::Storage(e.to_string()))?;
        let tmp = self.temp_path();
        let result: std::io::Result<()> = async {
            fs::write(&tmp, data).await?;
            fs::rename(&tmp, &self.file_path).await
        }
        .await;
        result.map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "failed to persist student file");
            ServiceError::Storage(e.to_string())
        })
    }
}
