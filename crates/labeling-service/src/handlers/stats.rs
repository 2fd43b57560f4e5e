//! 统计 API 处理器

use axum::{
    Json,
    extract::{Query, State},
};

use rule_engine::{StatisticsFilter, stats};

use crate::{
    dto::{ApiResponse, StatisticsQuery, StatisticsResponse},
    error::ServiceError,
    state::AppState,
};

/// 获取处理统计
///
/// GET /api/statistics
///
/// 纯读取派生，支持按标签与时间窗口过滤。
pub async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<ApiResponse<StatisticsResponse>>, ServiceError> {
    let filter = StatisticsFilter {
        label: query.label,
        from: query.from,
        to: query.to,
    };

    let history = state.history.read().await;
    let statistics = stats::derive(&history, &filter);

    Ok(Json(ApiResponse::success(statistics.into())))
}
