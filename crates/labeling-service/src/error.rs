//! 服务错误类型定义
//!
//! 统一错误响应：状态码 + 错误码 + 信息，序列化为 ApiResponse 包络。

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rule_engine::RuleError;
use serde_json::json;
use uuid::Uuid;

/// 服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    // 语法错误：条件文本不符合语法，在创建/更新时直接拒绝
    #[error("条件语法错误: {0}")]
    Syntax(String),

    // 资源不存在
    #[error("规则不存在: {0}")]
    RuleNotFound(Uuid),

    // 验证错误：请求参数或载荷形状不合法
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 系统错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ServiceError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Syntax(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RuleNotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Syntax(_) => "SYNTAX_ERROR",
            Self::RuleNotFound(_) => "RULE_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从规则引擎错误转换
impl From<RuleError> for ServiceError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::Syntax(msg) => Self::Syntax(msg),
            RuleError::NotFound(id) => Self::RuleNotFound(id),
            RuleError::Validation(msg) => Self::Validation(msg),
        }
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从 Json 提取器拒绝转换，保证请求体解析失败也走统一响应包络
impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
