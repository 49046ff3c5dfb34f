mod condition;
mod edit;
mod factory;
mod registry;
mod services;

pub use condition::Condition;
pub use edit::{apply_edit, render, ConditionView, EditAction, RuleView};
pub use factory::{RuleConstructor, RuleFactory, RuleInput};
pub use registry::{HookId, RuleTypeRegistry, TypeListHook};
pub use services::Services;
