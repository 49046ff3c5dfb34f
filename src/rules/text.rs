use crate::types::{
    config_entry, new_uid, uid_from_value, ConditionError, EditField, InputKind, Rule,
    RuleDescriptor,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TEXT_RULE_TYPE: &str = "text";

pub fn descriptor() -> RuleDescriptor {
    RuleDescriptor {
        type_name: TEXT_RULE_TYPE.to_string(),
        name: "文本匹配".to_string(),
        description: "按子串匹配文本内容".to_string(),
    }
}

#[derive(Debug)]
pub struct TextRule {
    uid: String,
    config: TextRuleConfig,
    attached_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TextRuleConfig {
    #[serde(default)]
    pub value: String,
}

impl TextRule {
    pub fn new(config: TextRuleConfig) -> Self {
        Self::with_uid(new_uid(), config)
    }

    pub fn with_uid(uid: impl Into<String>, config: TextRuleConfig) -> Self {
        Self {
            uid: uid.into(),
            config,
            attached_to: None,
        }
    }

    /// 从配置条目构造，保留调用方给定的 uid
    pub fn from_value(value: Value) -> Result<Self, ConditionError> {
        let uid = uid_from_value(&value);
        let config: TextRuleConfig = serde_json::from_value(value)
            .map_err(|e| ConditionError::ConfigError(format!("text 规则配置解析失败: {e}")))?;

        Ok(match uid {
            Some(uid) => Self::with_uid(uid, config),
            None => Self::new(config),
        })
    }
}

impl Rule for TextRule {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn type_name(&self) -> &str {
        TEXT_RULE_TYPE
    }

    fn descriptor(&self) -> RuleDescriptor {
        descriptor()
    }

    fn get_config(&self) -> Value {
        config_entry(TEXT_RULE_TYPE, &self.uid, &self.config)
    }

    fn attach(&mut self, handle: &str) {
        self.attached_to = Some(handle.to_string());
    }

    fn condition_handle(&self) -> Option<&str> {
        self.attached_to.as_deref()
    }

    fn edit_fields(&self) -> Vec<EditField> {
        vec![EditField::new(
            "value",
            "匹配文本",
            InputKind::Text,
            self.config.value.clone(),
        )]
    }
}
