use crate::engine::{Condition, Services};
use crate::types::{ConditionError, EditField, RuleDescriptor};
use serde::Serialize;
use serde_json::Value;

/// 编辑界面发来的离散动作
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// 仅重新渲染当前状态
    Refresh,
    /// 追加一条规则；不给类型时取第一个候选类型
    AddRule { type_name: Option<String> },
    /// 按 uid 移除规则
    RemoveRule { uid: String },
}

/// 渲染协调者消费的视图模型，不含任何标记语言
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConditionView {
    pub handle: String,
    pub rules: Vec<RuleView>,
    pub type_options: Vec<RuleDescriptor>,
    /// 候选类型集为空时隐藏"添加规则"入口
    pub can_add: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RuleView {
    pub uid: String,
    pub type_name: String,
    pub display_name: String,
    /// 字段命名空间前缀 `{handle}-{uid}`，避免多个条件间字段名冲突
    pub prefix: String,
    pub fields: Vec<EditField>,
}

/// 执行一个编辑动作并返回最新渲染
///
/// 动作同步完成，效果对后续读取立即可见。
pub fn apply_edit(
    condition: &mut Condition,
    action: EditAction,
    services: &Services,
) -> Result<ConditionView, ConditionError> {
    match action {
        EditAction::Refresh => {}
        EditAction::AddRule { type_name } => {
            let type_name = match type_name {
                Some(type_name) => Some(type_name),
                None => services
                    .registry
                    .candidate_types(condition.kind())
                    .into_iter()
                    .next(),
            };

            // 候选集为空时添加入口本就被隐藏，动作退化为刷新
            if let Some(type_name) = type_name {
                let rule = services
                    .factory
                    .build(&type_name, Value::Object(serde_json::Map::new()))?;
                condition.add_rule(rule);
            }
        }
        EditAction::RemoveRule { uid } => {
            condition.remove_rule(&uid);
        }
    }

    Ok(render(condition, services))
}

/// 渲染条件当前状态
pub fn render(condition: &Condition, services: &Services) -> ConditionView {
    ConditionView {
        handle: condition.handle().to_string(),
        rules: condition
            .rules()
            .iter()
            .map(|rule| RuleView {
                uid: rule.uid().to_string(),
                type_name: rule.type_name().to_string(),
                display_name: rule.descriptor().name,
                prefix: format!("{}-{}", condition.handle(), rule.uid()),
                fields: rule.edit_fields(),
            })
            .collect(),
        type_options: condition.rule_type_options(services),
        can_add: !services
            .registry
            .candidate_types(condition.kind())
            .is_empty(),
    }
}
