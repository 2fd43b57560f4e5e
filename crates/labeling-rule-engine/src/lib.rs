//! 记录打标规则引擎
//!
//! 提供对结构化记录（JSON 载荷）的条件规则评估能力，支持：
//! - 条件表达式解析（`Price > 10 AND Product = "Chocolate"`）
//! - 对记录字段的布尔求值
//! - 规则注册与按优先级的匹配解析
//! - 处理编排、历史记录与统计派生

pub mod error;
pub mod evaluator;
pub mod history;
pub mod models;
pub mod parser;
pub mod processor;
pub mod registry;
pub mod stats;

pub use error::{Result, RuleError};
pub use evaluator::ConditionEvaluator;
pub use history::{History, ProcessingEvent};
pub use models::{ComparisonOp, ConditionExpr, Literal, LogicalOp, Record};
pub use processor::{ProcessingResult, Processor};
pub use registry::{Rule, RuleDraft, RuleRegistry, RuleUpdate};
pub use stats::{LabelBreakdown, Statistics, StatisticsFilter};
