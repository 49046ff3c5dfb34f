use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConditionError {
    #[error("未注册的规则类型: {0}")]
    UnknownRuleType(String),

    #[error("未注册的条件种类: {0}")]
    UnknownConditionKind(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}
