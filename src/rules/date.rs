use crate::types::{
    config_entry, new_uid, uid_from_value, ConditionError, EditField, InputKind, Rule,
    RuleDescriptor,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DATE_RULE_TYPE: &str = "date";

pub fn descriptor() -> RuleDescriptor {
    RuleDescriptor {
        type_name: DATE_RULE_TYPE.to_string(),
        name: "日期范围".to_string(),
        description: "限定日期在给定区间内".to_string(),
    }
}

#[derive(Debug)]
pub struct DateRule {
    uid: String,
    config: DateRuleConfig,
    attached_to: Option<String>,
}

/// 上下界都可选，只给一边就是开区间
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DateRuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<NaiveDate>,
}

impl DateRule {
    pub fn new(config: DateRuleConfig) -> Self {
        Self::with_uid(new_uid(), config)
    }

    pub fn with_uid(uid: impl Into<String>, config: DateRuleConfig) -> Self {
        Self {
            uid: uid.into(),
            config,
            attached_to: None,
        }
    }

    pub fn from_value(value: Value) -> Result<Self, ConditionError> {
        let uid = uid_from_value(&value);
        let config: DateRuleConfig = serde_json::from_value(value)
            .map_err(|e| ConditionError::ConfigError(format!("date 规则配置解析失败: {e}")))?;

        Ok(match uid {
            Some(uid) => Self::with_uid(uid, config),
            None => Self::new(config),
        })
    }
}

impl Rule for DateRule {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn type_name(&self) -> &str {
        DATE_RULE_TYPE
    }

    fn descriptor(&self) -> RuleDescriptor {
        descriptor()
    }

    fn get_config(&self) -> Value {
        config_entry(DATE_RULE_TYPE, &self.uid, &self.config)
    }

    fn attach(&mut self, handle: &str) {
        self.attached_to = Some(handle.to_string());
    }

    fn condition_handle(&self) -> Option<&str> {
        self.attached_to.as_deref()
    }

    fn edit_fields(&self) -> Vec<EditField> {
        let date_string =
            |date: Option<NaiveDate>| date.map(|d| d.to_string()).unwrap_or_default();

        vec![
            EditField::new(
                "after",
                "起始日期",
                InputKind::Date,
                date_string(self.config.after),
            ),
            EditField::new(
                "before",
                "截止日期",
                InputKind::Date,
                date_string(self.config.before),
            ),
        ]
    }
}
