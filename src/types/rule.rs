use crate::types::RuleDescriptor;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// 条件中的一条规则
///
/// 每条规则带有稳定的 `uid`（在所属条件内唯一，创建时生成一次，
/// 后续编辑不再变化）和类型标签。`get_config` 产出的对象必须包含
/// `type`、`uid` 及规则自身字段，保证配置记录可以无损往返。
pub trait Rule: Send + Sync + std::fmt::Debug {
    fn uid(&self) -> &str;

    fn type_name(&self) -> &str;

    fn descriptor(&self) -> RuleDescriptor;

    /// 序列化为配置记录中的一个条目
    fn get_config(&self) -> Value;

    /// 挂接到条件上，只记录 handle 作为非拥有的回引用
    fn attach(&mut self, handle: &str);

    fn condition_handle(&self) -> Option<&str>;

    /// 渲染钩子：交给外部渲染协调者的可编辑字段列表
    fn edit_fields(&self) -> Vec<EditField>;
}

/// 生成新的规则 uid
pub fn new_uid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// 一个可编辑字段的描述，字段名由渲染侧按 `{handle}-{uid}` 前缀命名空间化
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EditField {
    pub name: String,
    pub label: String,
    pub input: InputKind,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Date,
    Number,
}

impl EditField {
    pub fn new(name: &str, label: &str, input: InputKind, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            input,
            value: value.into(),
        }
    }
}

/// 把规则自身字段与 type/uid 合并成配置条目
pub(crate) fn config_entry<T: Serialize>(type_name: &str, uid: &str, fields: &T) -> Value {
    let mut obj = match serde_json::to_value(fields) {
        Ok(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    obj.insert("type".to_string(), Value::String(type_name.to_string()));
    obj.insert("uid".to_string(), Value::String(uid.to_string()));
    Value::Object(obj)
}

/// 从原始配置条目中取出调用方给定的 uid
pub(crate) fn uid_from_value(value: &Value) -> Option<String> {
    value.get("uid").and_then(Value::as_str).map(str::to_string)
}
