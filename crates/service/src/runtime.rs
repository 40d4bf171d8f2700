//! Runtime environment helpers
//!
//! Startup check for the student data file's directory, delegated to
//! `common::env` so `server::startup` prepares storage through the service layer.

/// Ensure the directory holding the student data file exists.
pub async fn ensure_env(data_file: &str) -> anyhow::Result<()> {
    common::env::ensure_data_dir(data_file).await
}
