use crate::engine::{RuleConstructor, RuleFactory, RuleTypeRegistry};
use crate::rules::{
    date, number, text, DateRule, DateRuleConfig, NumberRule, NumberRuleConfig, SearchCondition,
    TextRule, TextRuleConfig,
};
use crate::types::{ConditionKind, Rule};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// 显式的服务上下文
///
/// 工厂、注册表与条件种类都挂在这里，由调用方显式传入需要它们的
/// 操作，取代原实现里的全局单例查找。
pub struct Services {
    pub factory: RuleFactory,
    pub registry: RuleTypeRegistry,
    kinds: RwLock<HashMap<String, Arc<dyn ConditionKind>>>,
}

impl Services {
    /// 创建上下文并注册内置规则类型与条件种类
    pub fn new() -> Self {
        let factory = RuleFactory::new();

        // 注册内置规则类型
        let constructors: Vec<(crate::types::RuleDescriptor, RuleConstructor)> = vec![
            (
                text::descriptor(),
                Arc::new(|payload| {
                    if payload.as_object().is_some_and(|obj| obj.is_empty()) {
                        Ok(Box::new(TextRule::new(TextRuleConfig::default())) as Box<dyn Rule>)
                    } else {
                        TextRule::from_value(payload).map(|rule| Box::new(rule) as Box<dyn Rule>)
                    }
                }),
            ),
            (
                date::descriptor(),
                Arc::new(|payload| {
                    if payload.as_object().is_some_and(|obj| obj.is_empty()) {
                        Ok(Box::new(DateRule::new(DateRuleConfig::default())) as Box<dyn Rule>)
                    } else {
                        DateRule::from_value(payload).map(|rule| Box::new(rule) as Box<dyn Rule>)
                    }
                }),
            ),
            (
                number::descriptor(),
                Arc::new(|payload| {
                    if payload.as_object().is_some_and(|obj| obj.is_empty()) {
                        Ok(Box::new(NumberRule::new(NumberRuleConfig::default())) as Box<dyn Rule>)
                    } else {
                        NumberRule::from_value(payload).map(|rule| Box::new(rule) as Box<dyn Rule>)
                    }
                }),
            ),
        ];

        for (descriptor, constructor) in constructors {
            factory.register(descriptor, constructor);
        }

        let services = Self {
            factory,
            registry: RuleTypeRegistry::new(),
            kinds: RwLock::new(HashMap::new()),
        };

        services.register_kind(Arc::new(SearchCondition));

        services
    }

    /// 注册条件种类，供配置记录的 `type` 字段反查
    pub fn register_kind(&self, kind: Arc<dyn ConditionKind>) {
        self.kinds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind.type_name().to_string(), kind);
    }

    pub fn kind(&self, type_name: &str) -> Option<Arc<dyn ConditionKind>> {
        self.kinds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_name)
            .cloned()
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new()
    }
}
