use crate::types::ConditionKind;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

pub type HookId = u64;

/// 扩展钩子：拿到当前候选列表，可以就地增删或重排
pub type TypeListHook = Box<dyn Fn(&dyn ConditionKind, &mut Vec<String>) + Send + Sync>;

/// 候选规则类型注册表
///
/// `candidate_types` 先取条件种类静态声明的列表，再按注册顺序依次
/// 执行所有扩展钩子。每次调用都重新计算，不做缓存，钩子注册与移除
/// 立即对后续调用生效。
pub struct RuleTypeRegistry {
    hooks: RwLock<Vec<(HookId, TypeListHook)>>,
    next_hook_id: AtomicU64,
}

impl RuleTypeRegistry {
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(Vec::new()),
            next_hook_id: AtomicU64::new(1),
        }
    }

    /// 注册扩展钩子，返回用于移除的句柄
    pub fn register_hook<F>(&self, hook: F) -> HookId
    where
        F: Fn(&dyn ConditionKind, &mut Vec<String>) + Send + Sync + 'static,
    {
        let id = self.next_hook_id.fetch_add(1, Ordering::SeqCst);
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(hook)));
        tracing::debug!(hook_id = id, "注册候选类型扩展钩子");
        id
    }

    /// 移除钩子；句柄未知时返回 false
    pub fn remove_hook(&self, id: HookId) -> bool {
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        let before = hooks.len();
        hooks.retain(|(hook_id, _)| *hook_id != id);
        hooks.len() != before
    }

    /// 计算某条件种类当前的候选类型列表
    pub fn candidate_types(&self, kind: &dyn ConditionKind) -> Vec<String> {
        let mut types = kind.declared_rule_types();
        for (_, hook) in self
            .hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            hook(kind, &mut types);
        }
        dedup_preserve_order(types)
    }
}

impl Default for RuleTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 去重，保留首次出现的位置
pub(crate) fn dedup_preserve_order(types: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    types
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct TestKind(Vec<&'static str>);

    impl ConditionKind for TestKind {
        fn type_name(&self) -> &str {
            "test_condition"
        }

        fn declared_rule_types(&self) -> Vec<String> {
            self.0.iter().map(|t| t.to_string()).collect()
        }
    }

    #[test]
    fn declared_list_passes_through_without_hooks() {
        let registry = RuleTypeRegistry::new();
        let kind = TestKind(vec!["text", "date"]);

        assert_eq!(registry.candidate_types(&kind), vec!["text", "date"]);
    }

    #[test]
    fn hook_can_append_a_type() {
        let registry = RuleTypeRegistry::new();
        let kind = TestKind(vec!["text"]);

        registry.register_hook(|_, types| types.push("geo".to_string()));

        assert_eq!(registry.candidate_types(&kind), vec!["text", "geo"]);
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let registry = RuleTypeRegistry::new();
        let kind = TestKind(vec!["text"]);

        registry.register_hook(|_, types| types.push("a".to_string()));
        registry.register_hook(|_, types| types.retain(|t| t != "text"));
        registry.register_hook(|_, types| types.reverse());

        assert_eq!(registry.candidate_types(&kind), vec!["a"]);
    }

    #[test]
    fn removing_a_hook_restores_the_declared_list() {
        let registry = RuleTypeRegistry::new();
        let kind = TestKind(vec!["text", "date"]);

        let id = registry.register_hook(|_, types| types.push("geo".to_string()));
        assert_eq!(registry.candidate_types(&kind), vec!["text", "date", "geo"]);

        assert!(registry.remove_hook(id));
        assert_eq!(registry.candidate_types(&kind), vec!["text", "date"]);
        assert!(!registry.remove_hook(id));
    }

    #[test]
    fn duplicates_are_collapsed_keeping_first_position() {
        let registry = RuleTypeRegistry::new();
        let kind = TestKind(vec!["text", "date"]);

        registry.register_hook(|_, types| types.push("text".to_string()));

        assert_eq!(registry.candidate_types(&kind), vec!["text", "date"]);
    }

    #[test]
    fn hook_can_see_the_kind() {
        let registry = RuleTypeRegistry::new();
        let kind = TestKind(vec!["text"]);

        registry.register_hook(|kind, types| {
            if kind.type_name() == "test_condition" {
                types.clear();
            }
        });

        assert!(registry.candidate_types(&kind).is_empty());
    }
}
