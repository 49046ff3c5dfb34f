use crate::engine::registry::dedup_preserve_order;
use crate::engine::{RuleInput, Services};
use crate::types::{ConditionConfig, ConditionError, ConditionKind, Rule, RuleDescriptor};
use std::collections::HashSet;
use std::sync::Arc;

/// 有序规则集合构成的条件
///
/// 条件独占其规则；规则只通过 handle 回引用条件。规则顺序即求值与
/// 展示顺序，可由调用方重排；uid 在一个条件内保持唯一。
#[derive(Debug)]
pub struct Condition {
    handle: String,
    kind: Arc<dyn ConditionKind>,
    rules: Vec<Box<dyn Rule>>,
}

impl Condition {
    pub fn new(kind: Arc<dyn ConditionKind>, handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            kind,
            rules: Vec::new(),
        }
    }

    /// 从配置记录重建条件，种类按记录的 `type` 字段在上下文中反查
    pub fn from_config(
        config: &ConditionConfig,
        services: &Services,
    ) -> Result<Self, ConditionError> {
        let kind = services
            .kind(&config.type_name)
            .ok_or_else(|| ConditionError::UnknownConditionKind(config.type_name.clone()))?;

        let mut condition = Condition::new(kind, &config.handle);
        condition.set_rules(
            config.rules.iter().cloned().map(RuleInput::Config).collect(),
            services,
        )?;
        Ok(condition)
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn kind(&self) -> &dyn ConditionKind {
        self.kind.as_ref()
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn rule(&self, uid: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.uid() == uid)
            .map(|rule| rule.as_ref())
    }

    /// 追加一条规则并挂接回引用
    ///
    /// 不检查 uid 重复，唯一性由调用方保证（工厂生成的 uid 天然唯一，
    /// 批量入口 `set_rules` 会整体校验）。
    pub fn add_rule(&mut self, mut rule: Box<dyn Rule>) {
        rule.attach(&self.handle);
        tracing::debug!(handle = %self.handle, uid = %rule.uid(), "追加规则");
        self.rules.push(rule);
    }

    /// 按 uid 移除规则；未命中时什么也不做，返回 false
    pub fn remove_rule(&mut self, uid: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.uid() != uid);
        let removed = self.rules.len() != before;
        if removed {
            tracing::debug!(handle = %self.handle, uid, "移除规则");
        }
        removed
    }

    /// 原位替换 uid 对应的规则，位置不变
    ///
    /// 替换视为原位的删除加新增：新规则保留自己的（新）uid，本 trait
    /// 不暴露 uid 的改写。未命中时不做任何修改，返回 false。
    pub fn replace_rule(&mut self, uid: &str, mut rule: Box<dyn Rule>) -> bool {
        match self.rules.iter().position(|existing| existing.uid() == uid) {
            Some(index) => {
                rule.attach(&self.handle);
                tracing::debug!(handle = %self.handle, old_uid = uid, new_uid = %rule.uid(), "替换规则");
                self.rules[index] = rule;
                true
            }
            None => false,
        }
    }

    /// 整体替换规则集合
    ///
    /// 先完整构造新列表并校验 uid 唯一，成功后才一次性换入；任何
    /// 错误都不会留下半改状态。
    pub fn set_rules(
        &mut self,
        inputs: Vec<RuleInput>,
        services: &Services,
    ) -> Result<(), ConditionError> {
        let mut rules = services.factory.build_all(inputs)?;

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.uid().to_string()) {
                return Err(ConditionError::ConfigError(format!(
                    "规则 uid 重复: {}",
                    rule.uid()
                )));
            }
        }

        for rule in &mut rules {
            rule.attach(&self.handle);
        }
        self.rules = rules;
        Ok(())
    }

    /// 产出配置记录，规则按集合顺序逐条序列化
    pub fn get_config(&self) -> ConditionConfig {
        ConditionConfig {
            type_name: self.kind.type_name().to_string(),
            handle: self.handle.clone(),
            rules: self.rules.iter().map(|rule| rule.get_config()).collect(),
        }
    }

    /// 当前可选的规则类型及其展示名
    ///
    /// 注册表给出的候选之外，条件中正在使用的类型必须始终可选，
    /// 即使注册表或扩展钩子把它过滤掉了；重复项只保留一次。
    pub fn rule_type_options(&self, services: &Services) -> Vec<RuleDescriptor> {
        let mut tags = services.registry.candidate_types(self.kind.as_ref());
        tags.extend(self.rules.iter().map(|rule| rule.type_name().to_string()));

        dedup_preserve_order(tags)
            .into_iter()
            .map(|tag| {
                services
                    .factory
                    .descriptor(&tag)
                    .unwrap_or_else(|| RuleDescriptor::bare(&tag))
            })
            .collect()
    }
}
