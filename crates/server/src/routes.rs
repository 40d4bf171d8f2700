use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;
use service::students::StudentStore;

pub mod students;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<StudentStore>,
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: health plus the student routes.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // 学生记录 CRUD、列表查询与统计；/students/stats 为静态段，优先于 /students/:id 匹配
    let student_routes = Router::new()
        .route("/students", get(students::list_students).post(students::create_student))
        .route("/students/stats", get(students::student_stats))
        .route(
            "/students/:id",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        );

    Router::new()
        .route("/health", get(health))
        .merge(student_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 请求到达时打点
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
