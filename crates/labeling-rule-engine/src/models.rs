//! 规则引擎领域模型

use crate::error::{Result, RuleError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 条件字面量
///
/// 类型在解析期由词法形式决定：引号 => 字符串，数字 => 数值，
/// `true`/`false` => 布尔。一旦解析完成不再变化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    String(String),
}

impl Literal {
    /// 尝试转换为 f64
    ///
    /// 数值直接返回；数值形式的字符串参与解析；布尔不参与数值强制转换
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    /// 规范化字符串形式，用于相等比较
    pub fn canonical(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// 比较操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl ComparisonOp {
    /// 条件文本中的操作符写法
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// 逻辑操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

/// 条件表达式树
///
/// 解析完成后不可变，由其所属规则独占持有。
/// 注意：`AND` 与 `OR` 没有优先级差异，`A AND B OR C` 表示
/// `((A AND B) OR C)`，即严格的从左到右折叠；括号可改变结合。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionExpr {
    /// 单个比较：`字段 操作符 字面量`
    Comparison {
        field: String,
        op: ComparisonOp,
        literal: Literal,
    },
    /// 二元逻辑组合
    Binary {
        left: Box<ConditionExpr>,
        op: LogicalOp,
        right: Box<ConditionExpr>,
    },
}

/// 待打标的记录 - 字段名到值的映射
///
/// 每次请求提供一份，除写入历史快照外不做保留。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    data: Value,
}

impl Record {
    /// 从 JSON 值构造记录，非对象载荷直接拒绝
    pub fn from_value(data: Value) -> Result<Self> {
        if !data.is_object() {
            return Err(RuleError::Validation(
                "载荷必须是 JSON 对象".to_string(),
            ));
        }
        Ok(Self { data })
    }

    /// 获取字段值（支持点号分隔的嵌套路径，如 "order.amount"）
    pub fn get_field(&self, path: &str) -> Option<&Value> {
        let mut current = &self.data;
        for part in path.split('.') {
            match current {
                Value::Object(map) => current = map.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// 获取底层数据
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// 取出底层数据（用于历史快照）
    pub fn into_value(self) -> Value {
        self.data
    }
}
