//! 处理编排器
//!
//! 接收记录，调用注册表完成匹配解析，将结果写入历史，
//! 返回应用的标签。字段语义层面的问题（缺失字段、类型不符）
//! 降级为不匹配，只有载荷本身不是 JSON 对象时才报错。

use crate::error::Result;
use crate::history::{History, ProcessingEvent};
use crate::models::Record;
use crate::registry::RuleRegistry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// 单次处理的结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub id: Uuid,
    /// 应用的标签，按规则优先级升序
    pub labels: Vec<String>,
    /// 匹配的规则 id，与 labels 顺序一致
    pub matched_rule_ids: Vec<Uuid>,
    pub timestamp: DateTime<Utc>,
}

/// 处理编排器
///
/// 注册表与历史由调用方持有（服务层通过读写锁共享），
/// 编排器本身无状态。
pub struct Processor;

impl Processor {
    /// 处理一条载荷：解析匹配规则、记录历史、返回标签
    pub fn process(
        registry: &RuleRegistry,
        history: &mut History,
        payload: Value,
    ) -> Result<ProcessingResult> {
        let record = Record::from_value(payload)?;

        let matches = registry.resolve(&record);
        let labels: Vec<String> = matches.iter().map(|r| r.label.clone()).collect();
        let matched_rule_ids: Vec<Uuid> = matches.iter().map(|r| r.id).collect();

        let event = ProcessingEvent {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload: record.into_value(),
            labels: labels.clone(),
            matched_rule_ids: matched_rule_ids.clone(),
        };

        debug!(
            event_id = %event.id,
            matched = matches.len(),
            "载荷处理完成"
        );

        let result = ProcessingResult {
            id: event.id,
            labels,
            matched_rule_ids,
            timestamp: event.timestamp,
        };
        history.push(event);

        Ok(result)
    }
}
