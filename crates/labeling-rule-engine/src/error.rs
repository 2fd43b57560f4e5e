//! 规则引擎错误类型

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("条件语法错误: {0}")]
    Syntax(String),

    #[error("规则不存在: {0}")]
    NotFound(Uuid),

    #[error("载荷格式无效: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, RuleError>;
