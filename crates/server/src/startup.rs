use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::{runtime, students::StudentStore};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over an already opened store.
pub fn app(students: Arc<StudentStore>) -> Router {
    routes::build_router(AppState { students }, build_cors())
}

/// Public entry: open the student file, build the app and run the HTTP server
pub async fn run(mut cfg: AppConfig) -> anyhow::Result<()> {
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    runtime::ensure_env(&cfg.storage.data_file).await?;
    let students = StudentStore::open(&cfg.storage.data_file)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| StartupError::Runtime(format!("cannot bind {addr}: {e}")))?;
    info!(%addr, data_file = %cfg.storage.data_file, "starting student registry");
    axum::serve(listener, app(students)).await?;
    Ok(())
}
