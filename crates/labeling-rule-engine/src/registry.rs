//! 规则注册表
//!
//! 持有规则定义（条件、标签、优先级、启用开关）并负责匹配解析。
//! 注册表本身不做加锁，调用方（服务层）通过读写锁保证
//! 变更与 `resolve` 不会交错观察到更新了一半的规则。

use crate::error::{Result, RuleError};
use crate::evaluator::ConditionEvaluator;
use crate::models::{ConditionExpr, Record};
use crate::parser;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 规则定义
///
/// 表达式树在创建/更新时即时解析并独占持有，评估期间不会变更。
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: Uuid,
    /// 原始条件文本
    pub condition: String,
    /// 标签，规则匹配时附加到记录
    pub label: String,
    /// 优先级，数值越小越先评估；相同优先级按创建顺序
    pub priority: i32,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 解析后的表达式树
    expr: ConditionExpr,
    /// 插入序号，相同优先级的稳定排序依据
    seq: u64,
}

impl Rule {
    /// 解析后的条件表达式
    pub fn expr(&self) -> &ConditionExpr {
        &self.expr
    }

    /// 判断规则是否匹配记录
    pub fn matches(&self, record: &Record) -> bool {
        ConditionEvaluator::evaluate(&self.expr, record)
    }
}

/// 创建规则的输入
#[derive(Debug, Clone)]
pub struct RuleDraft {
    pub condition: String,
    pub label: String,
    pub priority: i32,
    pub enabled: bool,
}

impl RuleDraft {
    pub fn new(condition: impl Into<String>, label: impl Into<String>, priority: i32) -> Self {
        Self {
            condition: condition.into(),
            label: label.into(),
            priority,
            enabled: true,
        }
    }
}

/// 更新规则的输入，None 表示该字段保持不变
#[derive(Debug, Clone, Default)]
pub struct RuleUpdate {
    pub condition: Option<String>,
    pub label: Option<String>,
    pub priority: Option<i32>,
    pub enabled: Option<bool>,
}

/// 规则注册表
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: HashMap<Uuid, Rule>,
    next_seq: u64,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 创建规则
    ///
    /// 条件即时解析，语法错误直接拒绝，不会注册半成品规则
    #[instrument(skip(self, draft), fields(label = %draft.label))]
    pub fn create(&mut self, draft: RuleDraft) -> Result<Rule> {
        let expr = parser::parse(&draft.condition)?;

        let now = Utc::now();
        let rule = Rule {
            id: Uuid::new_v4(),
            condition: draft.condition,
            label: draft.label,
            priority: draft.priority,
            enabled: draft.enabled,
            created_at: now,
            updated_at: now,
            expr,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        info!(rule_id = %rule.id, "规则已创建");
        self.rules.insert(rule.id, rule.clone());
        Ok(rule)
    }

    /// 更新规则
    ///
    /// 条件变更时重新解析；解析失败则原规则保持不变
    #[instrument(skip(self, changes))]
    pub fn update(&mut self, id: Uuid, changes: RuleUpdate) -> Result<Rule> {
        if !self.rules.contains_key(&id) {
            warn!(rule_id = %id, "更新不存在的规则");
            return Err(RuleError::NotFound(id));
        }

        // 先解析，失败时不触碰已存储的规则
        let parsed = match changes.condition {
            Some(text) => Some((parser::parse(&text)?, text)),
            None => None,
        };

        let rule = self.rules.get_mut(&id).ok_or(RuleError::NotFound(id))?;
        if let Some((expr, text)) = parsed {
            rule.condition = text;
            rule.expr = expr;
        }
        if let Some(label) = changes.label {
            rule.label = label;
        }
        if let Some(priority) = changes.priority {
            rule.priority = priority;
        }
        if let Some(enabled) = changes.enabled {
            rule.enabled = enabled;
        }
        rule.updated_at = Utc::now();

        info!(rule_id = %id, "规则已更新");
        Ok(rule.clone())
    }

    /// 翻转规则启用状态
    #[instrument(skip(self))]
    pub fn toggle(&mut self, id: Uuid) -> Result<Rule> {
        let rule = self
            .rules
            .get_mut(&id)
            .ok_or(RuleError::NotFound(id))?;
        rule.enabled = !rule.enabled;
        rule.updated_at = Utc::now();

        info!(rule_id = %id, enabled = rule.enabled, "规则状态已切换");
        Ok(rule.clone())
    }

    /// 删除规则
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        if self.rules.remove(&id).is_some() {
            info!(rule_id = %id, "规则已删除");
            Ok(())
        } else {
            warn!(rule_id = %id, "删除不存在的规则");
            Err(RuleError::NotFound(id))
        }
    }

    /// 获取规则
    pub fn get(&self, id: Uuid) -> Option<&Rule> {
        self.rules.get(&id)
    }

    /// 列出所有规则，按 (优先级, 创建顺序) 升序
    pub fn list(&self) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self.rules.values().collect();
        rules.sort_by_key(|r| (r.priority, r.seq));
        rules
    }

    /// 解析匹配规则
    ///
    /// 对启用的规则按 (优先级, 创建顺序) 升序做单趟评估，
    /// 收集所有匹配的规则（多标签策略：优先级只决定呈现顺序）
    pub fn resolve(&self, record: &Record) -> Vec<&Rule> {
        let mut active: Vec<&Rule> = self.rules.values().filter(|r| r.enabled).collect();
        active.sort_by_key(|r| (r.priority, r.seq));
        active.into_iter().filter(|r| r.matches(record)).collect()
    }
}
