//! 规则配置 API 处理器
//!
//! 实现打标规则的 CRUD 与启用开关操作。条件文本在创建/更新时
//! 即时解析，语法错误直接拒绝变更，不会留下半成品规则。

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use uuid::Uuid;
use validator::Validate;

use rule_engine::{RuleDraft, RuleUpdate};

use crate::{
    dto::{ApiResponse, CreateRuleRequest, DeletedResponse, RuleDto, UpdateRuleRequest},
    error::ServiceError,
    state::AppState,
};

/// 创建规则
///
/// POST /api/rules
pub async fn create_rule(
    State(state): State<AppState>,
    req: Result<Json<CreateRuleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RuleDto>>, ServiceError> {
    let Json(req) = req?;
    req.validate()?;

    let draft = RuleDraft {
        condition: req.condition,
        label: req.label,
        priority: req.priority,
        enabled: req.enabled,
    };

    let mut registry = state.registry.write().await;
    let rule = registry.create(draft)?;

    Ok(Json(ApiResponse::success(rule.into())))
}

/// 获取规则列表，按 (优先级, 创建顺序) 升序
///
/// GET /api/rules
pub async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RuleDto>>>, ServiceError> {
    let registry = state.registry.read().await;
    let items: Vec<RuleDto> = registry.list().into_iter().map(RuleDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// 获取规则详情
///
/// GET /api/rules/{id}
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RuleDto>>, ServiceError> {
    let registry = state.registry.read().await;
    let rule = registry.get(id).ok_or(ServiceError::RuleNotFound(id))?;
    Ok(Json(ApiResponse::success(rule.into())))
}

/// 更新规则
///
/// PUT /api/rules/{id}
pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    req: Result<Json<UpdateRuleRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RuleDto>>, ServiceError> {
    let Json(req) = req?;
    req.validate()?;

    let changes = RuleUpdate {
        condition: req.condition,
        label: req.label,
        priority: req.priority,
        enabled: req.enabled,
    };

    let mut registry = state.registry.write().await;
    let rule = registry.update(id, changes)?;

    Ok(Json(ApiResponse::success(rule.into())))
}

/// 翻转规则启用状态
///
/// POST /api/rules/{id}/toggle
pub async fn toggle_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RuleDto>>, ServiceError> {
    let mut registry = state.registry.write().await;
    let rule = registry.toggle(id)?;

    Ok(Json(ApiResponse::success(rule.into())))
}

/// 删除规则
///
/// DELETE /api/rules/{id}
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ServiceError> {
    let mut registry = state.registry.write().await;
    registry.delete(id)?;

    Ok(Json(ApiResponse::success(DeletedResponse { id })))
}
