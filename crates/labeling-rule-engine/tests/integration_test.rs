//! 规则引擎集成测试
//!
//! 覆盖完整工作流：规则注册、载荷处理、历史记录与统计派生。

use rule_engine::{
    History, Processor, RuleDraft, RuleRegistry, RuleUpdate, StatisticsFilter,
};
use serde_json::json;

/// 搭建原始示例中的三条种子规则
fn seed_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry
        .create(RuleDraft::new(
            r#"Product = "Chocolate" AND Price < 2"#,
            "Green",
            1,
        ))
        .unwrap();
    registry
        .create(RuleDraft::new(
            r#"Product = "Chocolate" AND Price >= 2 AND Price < 5"#,
            "Yellow",
            1,
        ))
        .unwrap();
    registry
        .create(RuleDraft::new("MOQ < 100", "HighPriority", 2))
        .unwrap();
    registry
}

// ==================== 场景测试 ====================

#[test]
fn scenario_expensive_price_match() {
    let mut registry = RuleRegistry::new();
    registry
        .create(RuleDraft::new("Price > 10", "expensive", 1))
        .unwrap();
    let mut history = History::new();

    let result = Processor::process(&registry, &mut history, json!({"Price": 15})).unwrap();
    assert_eq!(result.labels, vec!["expensive"]);
}

#[test]
fn scenario_cheap_chocolate_and_chain() {
    let mut registry = RuleRegistry::new();
    registry
        .create(RuleDraft::new(
            r#"Product = "Chocolate" AND Price < 5"#,
            "cheap-choc",
            1,
        ))
        .unwrap();
    let mut history = History::new();

    let result = Processor::process(
        &registry,
        &mut history,
        json!({"Product": "Chocolate", "Price": 3}),
    )
    .unwrap();
    assert_eq!(result.labels, vec!["cheap-choc"]);

    let result = Processor::process(
        &registry,
        &mut history,
        json!({"Product": "Chocolate", "Price": 10}),
    )
    .unwrap();
    assert!(result.labels.is_empty());
}

#[test]
fn scenario_multiple_matches_ordered_by_priority() {
    let mut registry = RuleRegistry::new();
    registry
        .create(RuleDraft::new("Price > 1", "later", 9))
        .unwrap();
    registry
        .create(RuleDraft::new("Price > 10", "earlier", 1))
        .unwrap();
    let mut history = History::new();

    let result = Processor::process(&registry, &mut history, json!({"Price": 50})).unwrap();
    assert_eq!(result.labels, vec!["earlier", "later"]);
    assert_eq!(result.matched_rule_ids.len(), 2);
}

#[test]
fn scenario_missing_field_no_match_no_error() {
    let mut registry = RuleRegistry::new();
    registry
        .create(RuleDraft::new("Price > 10", "expensive", 1))
        .unwrap();
    let mut history = History::new();

    let result =
        Processor::process(&registry, &mut history, json!({"Product": "Tea"})).unwrap();
    assert!(result.labels.is_empty());
    assert_eq!(history.len(), 1);
}

// ==================== 完整工作流 ====================

#[test]
fn test_full_workflow_with_statistics() {
    let registry = seed_registry();
    let mut history = History::new();

    // 便宜巧克力 => Green
    Processor::process(
        &registry,
        &mut history,
        json!({"Product": "Chocolate", "Price": 1.5, "MOQ": 500}),
    )
    .unwrap();

    // 中价巧克力 + 低起订量 => Yellow 与 HighPriority 同时命中
    let result = Processor::process(
        &registry,
        &mut history,
        json!({"Product": "Chocolate", "Price": 3, "MOQ": 50}),
    )
    .unwrap();
    assert_eq!(result.labels, vec!["Yellow", "HighPriority"]);

    // 无匹配
    Processor::process(
        &registry,
        &mut history,
        json!({"Product": "Tea", "Price": 9}),
    )
    .unwrap();

    let stats = rule_engine::stats::derive(&history, &StatisticsFilter::default());
    assert_eq!(stats.total_processed, 3);
    assert_eq!(stats.label_counts["Green"], 1);
    assert_eq!(stats.label_counts["Yellow"], 1);
    assert_eq!(stats.label_counts["HighPriority"], 1);
    assert_eq!(stats.rule_hit_counts.len(), 3);
}

#[test]
fn test_disable_and_update_affect_resolution() {
    let mut registry = seed_registry();
    let mut history = History::new();

    let rules = registry.list();
    let yellow_id = rules
        .iter()
        .find(|r| r.label == "Yellow")
        .map(|r| r.id)
        .unwrap();

    // 禁用 Yellow 后不再命中
    registry.toggle(yellow_id).unwrap();
    let result = Processor::process(
        &registry,
        &mut history,
        json!({"Product": "Chocolate", "Price": 3}),
    )
    .unwrap();
    assert!(result.labels.is_empty());

    // 重新启用并放宽条件
    registry.toggle(yellow_id).unwrap();
    registry
        .update(
            yellow_id,
            RuleUpdate {
                condition: Some(r#"Product = "Chocolate" AND Price < 100"#.to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let result = Processor::process(
        &registry,
        &mut history,
        json!({"Product": "Chocolate", "Price": 30}),
    )
    .unwrap();
    assert_eq!(result.labels, vec!["Yellow"]);
}

#[test]
fn test_round_trip_create_then_fetch() {
    let mut registry = RuleRegistry::new();
    let created = registry
        .create(RuleDraft::new(
            r#"Product = "Chocolate" AND Price >= 2"#,
            "mid-range",
            7,
        ))
        .unwrap();

    let fetched = registry.get(created.id).unwrap();
    assert_eq!(fetched.condition, r#"Product = "Chocolate" AND Price >= 2"#);
    assert_eq!(fetched.label, "mid-range");
    assert_eq!(fetched.priority, 7);
    assert!(fetched.enabled);
    assert_eq!(fetched.expr(), created.expr());
}

#[test]
fn test_history_reset() {
    let registry = seed_registry();
    let mut history = History::new();

    Processor::process(
        &registry,
        &mut history,
        json!({"Product": "Chocolate", "Price": 1}),
    )
    .unwrap();
    assert_eq!(history.len(), 1);

    history.clear();
    assert!(history.is_empty());

    let stats = rule_engine::stats::derive(&history, &StatisticsFilter::default());
    assert_eq!(stats.total_processed, 0);
}
