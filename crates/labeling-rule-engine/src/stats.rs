//! 统计派生
//!
//! 对处理历史的纯读取派生：总处理数、各标签计数、各规则命中计数，
//! 以及面向展示的标签占比明细。支持按标签和时间窗口过滤。

use crate::history::History;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// 统计查询过滤条件
#[derive(Debug, Clone, Default)]
pub struct StatisticsFilter {
    /// 仅统计包含该标签的事件
    pub label: Option<String>,
    /// 时间窗口下界（含）
    pub from: Option<DateTime<Utc>>,
    /// 时间窗口上界（含）
    pub to: Option<DateTime<Utc>>,
}

/// 单个标签的占比明细
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelBreakdown {
    pub label: String,
    pub count: u64,
    /// 占总处理数的百分比，保留两位小数
    pub percentage: f64,
}

/// 统计结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_processed: u64,
    pub label_counts: HashMap<String, u64>,
    pub rule_hit_counts: HashMap<Uuid, u64>,
    pub label_breakdown: Vec<LabelBreakdown>,
}

/// 从历史派生统计，不产生任何变更
pub fn derive(history: &History, filter: &StatisticsFilter) -> Statistics {
    let mut total_processed = 0u64;
    let mut label_counts: HashMap<String, u64> = HashMap::new();
    let mut rule_hit_counts: HashMap<Uuid, u64> = HashMap::new();

    for event in history.iter() {
        if let Some(from) = filter.from {
            if event.timestamp < from {
                continue;
            }
        }
        if let Some(to) = filter.to {
            if event.timestamp > to {
                continue;
            }
        }
        if let Some(label) = &filter.label {
            if !event.labels.contains(label) {
                continue;
            }
        }

        total_processed += 1;
        for label in &event.labels {
            *label_counts.entry(label.clone()).or_insert(0) += 1;
        }
        for rule_id in &event.matched_rule_ids {
            *rule_hit_counts.entry(*rule_id).or_insert(0) += 1;
        }
    }

    let mut label_breakdown: Vec<LabelBreakdown> = label_counts
        .iter()
        .map(|(label, &count)| {
            let percentage = if total_processed > 0 {
                let raw = count as f64 / total_processed as f64 * 100.0;
                (raw * 100.0).round() / 100.0
            } else {
                0.0
            };
            LabelBreakdown {
                label: label.clone(),
                count,
                percentage,
            }
        })
        .collect();

    // 按计数降序、标签字典序做确定性排序
    label_breakdown.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));

    Statistics {
        total_processed,
        label_counts,
        rule_hit_counts,
        label_breakdown,
    }
}
