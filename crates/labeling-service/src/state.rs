//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use rule_engine::{History, RuleRegistry};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Axum 应用共享状态
///
/// 规则注册表和处理历史是共享可变状态，通过读写锁保证
/// 规则变更与匹配解析不会交错：`resolve` 在读锁下对一致的
/// 规则快照做单趟评估，变更操作持写锁独占。
#[derive(Clone)]
pub struct AppState {
    /// 规则注册表
    pub registry: Arc<RwLock<RuleRegistry>>,
    /// 处理历史
    pub history: Arc<RwLock<History>>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(RuleRegistry::new())),
            history: Arc::new(RwLock::new(History::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
