//! 服务响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use chrono::{DateTime, Utc};
use rule_engine::{ProcessingResult, Rule, Statistics};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// API 统一响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_empty() -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: None,
        }
    }
}

/// 规则视图
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDto {
    pub id: Uuid,
    pub condition: String,
    pub label: String,
    pub priority: i32,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Rule> for RuleDto {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id,
            condition: rule.condition.clone(),
            label: rule.label.clone(),
            priority: rule.priority,
            enabled: rule.enabled,
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        }
    }
}

impl From<Rule> for RuleDto {
    fn from(rule: Rule) -> Self {
        Self::from(&rule)
    }
}

/// 删除操作响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub id: Uuid,
}

/// 载荷处理响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub id: Uuid,
    pub labels: Vec<String>,
    pub matched_rule_ids: Vec<Uuid>,
    pub timestamp: DateTime<Utc>,
}

impl From<ProcessingResult> for ProcessResponse {
    fn from(result: ProcessingResult) -> Self {
        Self {
            id: result.id,
            labels: result.labels,
            matched_rule_ids: result.matched_rule_ids,
            timestamp: result.timestamp,
        }
    }
}

/// 标签占比明细
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelBreakdownDto {
    pub label: String,
    pub count: u64,
    pub percentage: f64,
}

/// 统计查询响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total_processed: u64,
    pub label_counts: HashMap<String, u64>,
    pub rule_hit_counts: HashMap<Uuid, u64>,
    pub label_breakdown: Vec<LabelBreakdownDto>,
    pub timestamp: DateTime<Utc>,
}

impl From<Statistics> for StatisticsResponse {
    fn from(stats: Statistics) -> Self {
        Self {
            total_processed: stats.total_processed,
            label_counts: stats.label_counts,
            rule_hit_counts: stats.rule_hit_counts,
            label_breakdown: stats
                .label_breakdown
                .into_iter()
                .map(|b| LabelBreakdownDto {
                    label: b.label,
                    count: b.count,
                    percentage: b.percentage,
                })
                .collect(),
            timestamp: Utc::now(),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub rules_count: usize,
    pub processed_count: usize,
}
