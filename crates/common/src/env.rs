//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the directory holding `data_file` exists, creating it if needed.
pub async fn ensure_data_dir(data_file: &str) -> anyhow::Result<()> {
    let parent = match Path::new(data_file).parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };
    if tokio::fs::metadata(parent).await.is_err() {
        warn!(dir = %parent.display(), "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    info!(%data_file, "student data file location ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("common_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("nested").join("students.json");
        ensure_data_dir(&file.to_string_lossy()).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_needs_no_dir() -> anyhow::Result<()> {
        ensure_data_dir("students.json").await
    }
}
