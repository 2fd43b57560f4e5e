//! 条件评估器
//!
//! 对记录字段求值表达式树，产出布尔结果。评估是全函数：
//! 字段缺失或类型强制转换失败一律视为不匹配（false），绝不报错——
//! 载荷来自不可信的外部输入，评估必须对任意形状保持可用。

use crate::models::{ComparisonOp, ConditionExpr, Literal, LogicalOp, Record};
use serde_json::Value;

/// 条件评估器
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// 评估表达式
    ///
    /// 二元节点严格从左到右折叠：`A AND B OR C` 即 `((A AND B) OR C)`
    pub fn evaluate(expr: &ConditionExpr, record: &Record) -> bool {
        match expr {
            ConditionExpr::Comparison { field, op, literal } => {
                Self::evaluate_comparison(field, *op, literal, record)
            }
            ConditionExpr::Binary { left, op, right } => match op {
                LogicalOp::And => {
                    Self::evaluate(left, record) && Self::evaluate(right, record)
                }
                LogicalOp::Or => {
                    Self::evaluate(left, record) || Self::evaluate(right, record)
                }
            },
        }
    }

    /// 评估单个比较
    ///
    /// 字段缺失 => false；数值比较要求两侧都能强制为数值，否则 false
    fn evaluate_comparison(
        field: &str,
        op: ComparisonOp,
        literal: &Literal,
        record: &Record,
    ) -> bool {
        let Some(value) = record.get_field(field) else {
            return false;
        };

        match op {
            ComparisonOp::Eq => Self::eq(value, literal),
            ComparisonOp::Neq => !Self::eq(value, literal),
            ComparisonOp::Gt => Self::compare(value, literal, |a, b| a > b),
            ComparisonOp::Gte => Self::compare(value, literal, |a, b| a >= b),
            ComparisonOp::Lt => Self::compare(value, literal, |a, b| a < b),
            ComparisonOp::Lte => Self::compare(value, literal, |a, b| a <= b),
        }
    }

    /// 相等比较
    ///
    /// 两侧都能转为数值时按数值比较（"10" 与 10 相等），
    /// 否则按规范化字符串做大小写敏感比较
    fn eq(value: &Value, literal: &Literal) -> bool {
        if let (Some(a), Some(b)) = (Self::as_f64(value), literal.as_f64()) {
            return (a - b).abs() < f64::EPSILON;
        }

        match Self::canonical(value) {
            Some(s) => s == literal.canonical(),
            None => false,
        }
    }

    /// 数值比较
    fn compare<F>(value: &Value, literal: &Literal, cmp: F) -> bool
    where
        F: Fn(f64, f64) -> bool,
    {
        match (Self::as_f64(value), literal.as_f64()) {
            (Some(a), Some(b)) => cmp(a, b),
            _ => false,
        }
    }

    /// 尝试将字段值转为 f64
    ///
    /// 数值直接返回，数值形式的字符串参与解析；布尔不做数值转换
    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// 字段值的规范化字符串形式
    ///
    /// 数组、对象和 null 不参与任何比较
    fn canonical(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    fn eval(condition: &str, payload: serde_json::Value) -> bool {
        let expr = parser::parse(condition).unwrap();
        ConditionEvaluator::evaluate(&expr, &record(payload))
    }

    #[test]
    fn test_numeric_comparisons() {
        assert!(eval("Price > 10", json!({"Price": 15})));
        assert!(!eval("Price > 10", json!({"Price": 10})));
        assert!(eval("Price >= 10", json!({"Price": 10})));
        assert!(eval("Price < 5", json!({"Price": 3})));
        assert!(eval("Price <= 3", json!({"Price": 3})));
    }

    #[test]
    fn test_missing_field_is_false_not_error() {
        assert!(!eval("Price > 10", json!({"Product": "Tea"})));
        assert!(!eval("Price = 10", json!({})));
        assert!(!eval("Price != 10", json!({})));
    }

    #[test]
    fn test_string_equality_case_sensitive() {
        assert!(eval(r#"Product = "Chocolate""#, json!({"Product": "Chocolate"})));
        assert!(!eval(r#"Product = "chocolate""#, json!({"Product": "Chocolate"})));
        assert!(eval(r#"Product != "Tea""#, json!({"Product": "Chocolate"})));
    }

    #[test]
    fn test_numeric_string_coercion() {
        // 数值形式的字符串与数字按数值相等
        assert!(eval("Price = 10", json!({"Price": "10"})));
        assert!(eval("Price > 5", json!({"Price": "10"})));
        assert!(eval(r#"Price = "10""#, json!({"Price": 10})));
    }

    #[test]
    fn test_failed_coercion_is_false() {
        assert!(!eval("Price > 10", json!({"Price": "abc"})));
        assert!(!eval("Price > 10", json!({"Price": true})));
        assert!(!eval("Price < 10", json!({"Price": [1, 2]})));
    }

    #[test]
    fn test_boolean_equality() {
        assert!(eval("InStock = true", json!({"InStock": true})));
        assert!(eval("InStock != true", json!({"InStock": false})));
        assert!(!eval("InStock = true", json!({"InStock": false})));
    }

    #[test]
    fn test_non_scalar_values_never_match() {
        assert!(!eval(r#"Tags = "a""#, json!({"Tags": ["a"]})));
        assert!(!eval(r#"Meta = "x""#, json!({"Meta": {"k": "x"}})));
        assert!(!eval(r#"Field = "null""#, json!({"Field": null})));
    }

    #[test]
    fn test_and_chain() {
        let payload = json!({"Product": "Chocolate", "Price": 3});
        assert!(eval(r#"Product = "Chocolate" AND Price < 5"#, payload.clone()));
        assert!(!eval(
            r#"Product = "Chocolate" AND Price < 5"#,
            json!({"Product": "Chocolate", "Price": 10})
        ));
    }

    #[test]
    fn test_left_to_right_fold_semantics() {
        // a=1 AND b=2 OR c=3：a 与 b 不满足但 c 满足 => ((false) OR true) = true
        let payload = json!({"a": 9, "b": 9, "c": 3});
        assert!(eval("a = 1 AND b = 2 OR c = 3", payload));

        // a=1 OR b=2 AND c=9：((true OR false) AND false) = false，
        // 与常规 AND 优先级的结果不同
        let payload = json!({"a": 1, "b": 9, "c": 0});
        assert!(!eval("a = 1 OR b = 2 AND c = 9", payload));
    }

    #[test]
    fn test_parenthesized_evaluation() {
        let payload = json!({"a": 1, "b": 9, "c": 9});
        assert!(!eval("a = 1 AND (b = 2 OR c = 3)", payload));
        let payload = json!({"a": 1, "b": 2, "c": 9});
        assert!(eval("a = 1 AND (b = 2 OR c = 3)", payload));
    }

    #[test]
    fn test_nested_field_evaluation() {
        let payload = json!({"order": {"amount": 600}});
        assert!(eval("order.amount >= 500", payload));
    }
}
