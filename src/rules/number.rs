use crate::types::{
    config_entry, new_uid, uid_from_value, ConditionError, EditField, InputKind, Rule,
    RuleDescriptor,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NUMBER_RULE_TYPE: &str = "number";

pub fn descriptor() -> RuleDescriptor {
    RuleDescriptor {
        type_name: NUMBER_RULE_TYPE.to_string(),
        name: "数值范围".to_string(),
        description: "限定数值在给定区间内".to_string(),
    }
}

#[derive(Debug)]
pub struct NumberRule {
    uid: String,
    config: NumberRuleConfig,
    attached_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NumberRuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumberRule {
    pub fn new(config: NumberRuleConfig) -> Self {
        Self::with_uid(new_uid(), config)
    }

    pub fn with_uid(uid: impl Into<String>, config: NumberRuleConfig) -> Self {
        Self {
            uid: uid.into(),
            config,
            attached_to: None,
        }
    }

    pub fn from_value(value: Value) -> Result<Self, ConditionError> {
        let uid = uid_from_value(&value);
        let config: NumberRuleConfig = serde_json::from_value(value)
            .map_err(|e| ConditionError::ConfigError(format!("number 规则配置解析失败: {e}")))?;

        Ok(match uid {
            Some(uid) => Self::with_uid(uid, config),
            None => Self::new(config),
        })
    }
}

impl Rule for NumberRule {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn type_name(&self) -> &str {
        NUMBER_RULE_TYPE
    }

    fn descriptor(&self) -> RuleDescriptor {
        descriptor()
    }

    fn get_config(&self) -> Value {
        config_entry(NUMBER_RULE_TYPE, &self.uid, &self.config)
    }

    fn attach(&mut self, handle: &str) {
        self.attached_to = Some(handle.to_string());
    }

    fn condition_handle(&self) -> Option<&str> {
        self.attached_to.as_deref()
    }

    fn edit_fields(&self) -> Vec<EditField> {
        let number_string = |n: Option<f64>| n.map(|v| v.to_string()).unwrap_or_default();

        vec![
            EditField::new(
                "min",
                "最小值",
                InputKind::Number,
                number_string(self.config.min),
            ),
            EditField::new(
                "max",
                "最大值",
                InputKind::Number,
                number_string(self.config.max),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn round_trips_bounds() {
        let rule =
            NumberRule::from_value(json!({ "type": "number", "uid": "r3", "min": 1.0, "max": 9.5 }))
                .unwrap();

        assert_eq!(
            rule.get_config(),
            json!({ "type": "number", "uid": "r3", "min": 1.0, "max": 9.5 })
        );
    }

    #[test]
    fn rejects_non_numeric_bounds() {
        let result = NumberRule::from_value(json!({ "type": "number", "min": "low" }));

        assert!(matches!(result, Err(ConditionError::ConfigError(_))));
    }
}
