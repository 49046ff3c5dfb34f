pub mod date;
pub mod number;
pub mod text;

pub use date::{DateRule, DateRuleConfig, DATE_RULE_TYPE};
pub use number::{NumberRule, NumberRuleConfig, NUMBER_RULE_TYPE};
pub use text::{TextRule, TextRuleConfig, TEXT_RULE_TYPE};

use crate::types::ConditionKind;

pub const SEARCH_CONDITION_TYPE: &str = "search_condition";

/// 内置的搜索条件种类
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchCondition;

impl ConditionKind for SearchCondition {
    fn type_name(&self) -> &str {
        SEARCH_CONDITION_TYPE
    }

    fn declared_rule_types(&self) -> Vec<String> {
        vec![
            TEXT_RULE_TYPE.to_string(),
            DATE_RULE_TYPE.to_string(),
            NUMBER_RULE_TYPE.to_string(),
        ]
    }
}
