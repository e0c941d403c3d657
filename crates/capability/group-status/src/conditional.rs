//! 列条件格式：按顺序匹配，第一条命中的规则生效。

use api_contract::CellDto;
use prodmon_storage::{ConditionalFormatRecord, FormatOperator};

/// 单条规则是否命中。数值比较使用 `min` 作为操作数，`Between` 为闭区间。
pub fn matches(rule: &ConditionalFormatRecord, cell: &CellDto) -> bool {
    use FormatOperator::*;
    match rule.operator {
        TextEquals => match rule.text.as_deref() {
            Some(text) => cell.text.trim().eq_ignore_ascii_case(text.trim()),
            None => false,
        },
        TextContains => match rule.text.as_deref() {
            Some(text) => cell
                .text
                .to_ascii_lowercase()
                .contains(&text.to_ascii_lowercase()),
            None => false,
        },
        Between => match (cell.value, rule.min, rule.max) {
            (Some(value), Some(min), Some(max)) => value >= min && value <= max,
            _ => false,
        },
        numeric => {
            let (Some(value), Some(operand)) = (cell.value, rule.min) else {
                return false;
            };
            match numeric {
                Equal => value == operand,
                NotEqual => value != operand,
                GreaterThan => value > operand,
                GreaterOrEqual => value >= operand,
                LessThan => value < operand,
                LessOrEqual => value <= operand,
                _ => false,
            }
        }
    }
}

/// 应用第一条命中的规则；规则中的颜色覆盖格式化器设置的颜色。
pub fn apply(rules: &[ConditionalFormatRecord], cell: &mut CellDto) {
    let Some(rule) = rules.iter().find(|rule| matches(rule, cell)) else {
        return;
    };
    if let Some(back) = &rule.back_color {
        cell.back_color = Some(back.clone());
    }
    if let Some(fore) = &rule.fore_color {
        cell.fore_color = Some(fore.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(operator: FormatOperator, min: Option<f64>, max: Option<f64>, back: &str) -> ConditionalFormatRecord {
        ConditionalFormatRecord {
            operator,
            min,
            max,
            text: None,
            back_color: Some(back.to_string()),
            fore_color: None,
        }
    }

    fn number(value: f64) -> CellDto {
        CellDto {
            value: Some(value),
            text: value.to_string(),
            ..CellDto::default()
        }
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![
            rule(FormatOperator::GreaterThan, Some(100.0), None, "#111111"),
            rule(FormatOperator::Between, Some(50.0), Some(100.0), "#222222"),
            rule(FormatOperator::LessOrEqual, Some(100.0), None, "#333333"),
        ];
        let mut high = number(150.0);
        apply(&rules, &mut high);
        assert_eq!(high.back_color.as_deref(), Some("#111111"));

        let mut edge = number(100.0);
        apply(&rules, &mut edge);
        assert_eq!(edge.back_color.as_deref(), Some("#222222"));

        let mut low = number(10.0);
        apply(&rules, &mut low);
        assert_eq!(low.back_color.as_deref(), Some("#333333"));
    }

    #[test]
    fn text_rules_and_empty_cells() {
        let mut contains = rule(FormatOperator::TextContains, None, None, "#FF0000");
        contains.text = Some("shut".to_string());
        let mut cell = CellDto {
            text: "Shutdown - Low Fluid".to_string(),
            ..CellDto::default()
        };
        apply(std::slice::from_ref(&contains), &mut cell);
        assert_eq!(cell.back_color.as_deref(), Some("#FF0000"));

        let mut empty = CellDto::default();
        apply(&[rule(FormatOperator::NotEqual, Some(1.0), None, "#000000")], &mut empty);
        assert!(empty.back_color.is_none());
    }
}
