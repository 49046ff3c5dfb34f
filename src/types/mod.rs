mod descriptor;
mod error;
mod rule;

pub use descriptor::*;
pub use error::*;
pub use rule::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 条件种类：声明静态的候选规则类型列表
///
/// 配置记录的 `type` 字段就是 `type_name()`，据此在 [`crate::Services`]
/// 中反查种类完成反序列化。
pub trait ConditionKind: Send + Sync + std::fmt::Debug {
    fn type_name(&self) -> &str;

    /// 静态声明的候选规则类型，最终列表还要经过扩展钩子
    fn declared_rule_types(&self) -> Vec<String>;
}

// 条件的配置记录，存储与传输的稳定契约
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionConfig {
    #[serde(rename = "type")]
    pub type_name: String,
    pub handle: String,
    #[serde(rename = "conditionRules")]
    pub rules: Vec<Value>,
}
