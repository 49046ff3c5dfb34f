use crate::types::{ConditionError, Rule, RuleDescriptor};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// 规则构造函数：从原始配置载荷构造一条规则
pub type RuleConstructor =
    Arc<dyn Fn(Value) -> Result<Box<dyn Rule>, ConditionError> + Send + Sync>;

/// `set_rules` 等构造入口接受的异构元素
pub enum RuleInput {
    /// 原始配置载荷，交给工厂构造
    Config(Value),
    /// 已构造的规则，原样透传
    Built(Box<dyn Rule>),
}

impl From<Value> for RuleInput {
    fn from(value: Value) -> Self {
        RuleInput::Config(value)
    }
}

impl From<Box<dyn Rule>> for RuleInput {
    fn from(rule: Box<dyn Rule>) -> Self {
        RuleInput::Built(rule)
    }
}

/// 按类型标签注册的规则工厂
///
/// 显式的 标签 -> 构造函数 映射，进程启动时注册。未知标签构造
/// 直接报 [`ConditionError::UnknownRuleType`]，而不是静默跳过。
pub struct RuleFactory {
    constructors: RwLock<HashMap<String, (RuleDescriptor, RuleConstructor)>>,
}

impl RuleFactory {
    pub fn new() -> Self {
        Self {
            constructors: RwLock::new(HashMap::new()),
        }
    }

    /// 注册规则类型；同名标签后注册者覆盖前者
    pub fn register(&self, descriptor: RuleDescriptor, constructor: RuleConstructor) {
        self.constructors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(descriptor.type_name.clone(), (descriptor, constructor));
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(type_name)
    }

    pub fn descriptor(&self, type_name: &str) -> Option<RuleDescriptor> {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_name)
            .map(|(descriptor, _)| descriptor.clone())
    }

    /// 构造一条规则；空对象载荷产出默认配置的实例
    pub fn build(&self, type_name: &str, payload: Value) -> Result<Box<dyn Rule>, ConditionError> {
        let constructor = self
            .constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_name)
            .map(|(_, constructor)| constructor.clone())
            .ok_or_else(|| ConditionError::UnknownRuleType(type_name.to_string()))?;

        constructor(payload)
    }

    /// 构造异构输入列表
    ///
    /// 已构造的规则原样透传；非对象载荷和缺少 `type` 字段的对象属于
    /// 畸形条目，静默丢弃（仅记日志）；`type` 字段存在但未注册时整个
    /// 操作以错误终止，避免把数据损坏掩盖成静默丢失。
    pub fn build_all(&self, inputs: Vec<RuleInput>) -> Result<Vec<Box<dyn Rule>>, ConditionError> {
        let mut rules = Vec::with_capacity(inputs.len());
        let mut dropped = 0usize;

        for input in inputs {
            match input {
                RuleInput::Built(rule) => rules.push(rule),
                RuleInput::Config(payload) => {
                    let type_name = payload
                        .as_object()
                        .and_then(|obj| obj.get("type"))
                        .and_then(Value::as_str);

                    match type_name {
                        Some(type_name) => {
                            let type_name = type_name.to_string();
                            rules.push(self.build(&type_name, payload)?);
                        }
                        None => {
                            // 畸形条目走宽松策略，保持与既有存量配置兼容
                            dropped += 1;
                        }
                    }
                }
            }
        }

        if dropped > 0 {
            tracing::warn!(dropped, "丢弃无法识别的规则条目");
        }

        Ok(rules)
    }
}

impl Default for RuleFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{TextRule, TextRuleConfig, TEXT_RULE_TYPE};
    use crate::Services;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn unknown_type_is_a_hard_error() {
        let services = Services::new();

        let result = services.factory.build("no_such_type", json!({}));
        assert!(matches!(
            result,
            Err(ConditionError::UnknownRuleType(t)) if t == "no_such_type"
        ));
    }

    #[test]
    fn empty_payload_builds_a_default_rule() {
        let services = Services::new();

        let rule = services.factory.build(TEXT_RULE_TYPE, json!({})).unwrap();
        assert_eq!(rule.type_name(), TEXT_RULE_TYPE);
        assert!(!rule.uid().is_empty());
    }

    #[test]
    fn build_all_passes_built_rules_through_unchanged() {
        let services = Services::new();
        let rule = TextRule::with_uid(
            "r1",
            TextRuleConfig {
                value: "x".to_string(),
            },
        );

        let rules = services
            .factory
            .build_all(vec![RuleInput::Built(Box::new(rule))])
            .unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].uid(), "r1");
    }

    #[test]
    fn build_all_drops_malformed_entries_silently() {
        let services = Services::new();

        let rules = services
            .factory
            .build_all(vec![
                RuleInput::Config(json!("just a string")),
                RuleInput::Config(json!(42)),
                RuleInput::Config(json!({ "uid": "r9", "value": "no type tag" })),
                RuleInput::Config(json!({ "type": "text", "uid": "r1", "value": "x" })),
            ])
            .unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].uid(), "r1");
    }

    #[test]
    fn build_all_fails_on_unregistered_type_tag() {
        let services = Services::new();

        let result = services.factory.build_all(vec![RuleInput::Config(
            json!({ "type": "bogus", "uid": "r1" }),
        )]);

        assert!(matches!(result, Err(ConditionError::UnknownRuleType(_))));
    }

    #[test]
    fn registered_descriptor_is_returned_by_lookup() {
        let services = Services::new();

        let descriptor = services.factory.descriptor(TEXT_RULE_TYPE).unwrap();
        assert_eq!(descriptor.type_name, TEXT_RULE_TYPE);
        assert!(services.factory.has_type(TEXT_RULE_TYPE));
        assert!(!services.factory.has_type("bogus"));
    }
}
