pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{
    apply_edit, render, Condition, ConditionView, EditAction, HookId, RuleFactory, RuleInput,
    RuleTypeRegistry, RuleView, Services,
};
pub use rules::*;
pub use types::*;
