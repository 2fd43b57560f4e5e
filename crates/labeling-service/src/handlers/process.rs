//! 记录处理 API 处理器

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use rule_engine::Processor;

use crate::{
    dto::{ApiResponse, ProcessResponse},
    error::ServiceError,
    state::AppState,
};

/// 处理一条记录
///
/// POST /api/process
///
/// 对当前启用的规则做单趟匹配，返回命中的全部标签，
/// 并把处理事件追加到历史。载荷必须是 JSON 对象。
pub async fn process_payload(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<ProcessResponse>>, ServiceError> {
    let Json(payload) = payload?;
    // 锁顺序固定：先规则读锁，再历史写锁
    let registry = state.registry.read().await;
    let mut history = state.history.write().await;

    let result = Processor::process(&registry, &mut history, payload)?;

    Ok(Json(ApiResponse::success(result.into())))
}

/// 清空处理历史
///
/// POST /api/history/reset
///
/// 只影响历史与统计，不触碰规则。
pub async fn reset_history(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    let mut history = state.history.write().await;
    history.clear();

    Ok(Json(ApiResponse::<()>::success_empty()))
}
