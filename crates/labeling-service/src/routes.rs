//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{handlers, state::AppState};

/// 构建规则管理路由
///
/// 包含规则 CRUD 和启用开关操作
fn rule_routes() -> Router<AppState> {
    Router::new()
        .route("/rules", post(handlers::rule::create_rule))
        .route("/rules", get(handlers::rule::list_rules))
        .route("/rules/{id}", get(handlers::rule::get_rule))
        .route("/rules/{id}", put(handlers::rule::update_rule))
        .route("/rules/{id}", delete(handlers::rule::delete_rule))
        .route("/rules/{id}/toggle", post(handlers::rule::toggle_rule))
}

/// 构建记录处理路由
///
/// 包含记录打标和历史重置
fn process_routes() -> Router<AppState> {
    Router::new()
        .route("/process", post(handlers::process::process_payload))
        .route("/history/reset", post(handlers::process::reset_history))
}

/// 构建统计路由
fn stats_routes() -> Router<AppState> {
    Router::new().route("/statistics", get(handlers::stats::get_statistics))
}

/// 构建完整的 API 路由
///
/// 返回全部业务 API 路由（不含前缀，由调用方在 main.rs 中挂载）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(rule_routes())
        .merge(process_routes())
        .merge(stats_routes())
}
