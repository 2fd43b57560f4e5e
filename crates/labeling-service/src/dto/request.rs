//! 服务请求 DTO 定义

use serde::Deserialize;
use validator::Validate;

/// 创建规则请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    /// 条件文本，如 `Price > 10 AND Product = "Chocolate"`
    #[validate(length(min = 1, max = 1000, message = "条件不能为空且不超过1000字符"))]
    pub condition: String,
    #[validate(length(min = 1, max = 100, message = "标签不能为空且不超过100字符"))]
    pub label: String,
    /// 优先级，数值越小越优先；缺省为 1
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// 缺省启用
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_priority() -> i32 {
    1
}

fn default_enabled() -> bool {
    true
}

/// 更新规则请求，None 表示该字段保持不变
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRuleRequest {
    #[validate(length(min = 1, max = 1000, message = "条件不能为空且不超过1000字符"))]
    pub condition: Option<String>,
    #[validate(length(min = 1, max = 100, message = "标签不能为空且不超过100字符"))]
    pub label: Option<String>,
    pub priority: Option<i32>,
    pub enabled: Option<bool>,
}

/// 统计查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsQuery {
    /// 仅统计包含该标签的事件
    pub label: Option<String>,
    /// RFC 3339 时间下界（含）
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    /// RFC 3339 时间上界（含）
    pub to: Option<chrono::DateTime<chrono::Utc>>,
}
