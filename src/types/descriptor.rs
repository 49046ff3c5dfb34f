use serde::{Deserialize, Serialize};

/// 规则类型的展示元数据，挂在类型本身而非实例上
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub type_name: String,
    pub name: String,
    pub description: String,
}

impl RuleDescriptor {
    /// 为未注册的类型标签生成占位描述符
    pub fn bare(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            name: type_name.to_string(),
            description: String::new(),
        }
    }
}
