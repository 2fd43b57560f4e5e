//! 健康检查处理器

use axum::{Json, extract::State};

use crate::{dto::HealthResponse, state::AppState};

/// 健康检查
///
/// GET /health
///
/// 附带当前规则数与累计处理数，便于探活时顺带观察负载。
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let rules_count = state.registry.read().await.len();
    let processed_count = state.history.read().await.len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        rules_count,
        processed_count,
    })
}
