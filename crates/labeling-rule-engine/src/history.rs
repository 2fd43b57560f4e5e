//! 处理历史
//!
//! 进程级的追加式历史存储：每次处理调用产生一条事件记录，
//! 创建后不再变更。不设容量上限，仅通过显式 reset 清空。
//! 历史句柄由服务启动时创建并显式传入编排器，不依赖全局可变状态。

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

/// 单次处理的事件记录
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// 输入记录快照
    pub payload: Value,
    /// 应用的标签，按规则优先级排序
    pub labels: Vec<String>,
    /// 匹配的规则 id，与 labels 顺序一致
    pub matched_rule_ids: Vec<Uuid>,
}

/// 处理历史存储
#[derive(Debug, Default)]
pub struct History {
    events: Vec<ProcessingEvent>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 追加事件
    pub fn push(&mut self, event: ProcessingEvent) {
        self.events.push(event);
    }

    /// 所有事件，按处理先后排序
    pub fn events(&self) -> &[ProcessingEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessingEvent> {
        self.events.iter()
    }

    /// 显式重置，清空全部历史
    pub fn clear(&mut self) {
        let count = self.events.len();
        self.events.clear();
        info!(cleared = count, "处理历史已清空");
    }
}
