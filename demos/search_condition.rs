use condition_rs::{apply_edit, Condition, EditAction, RuleInput, SearchCondition, Services};
use serde_json::json;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let services = Services::new();

    // 扩展钩子：把 number 类型排到最前
    services.registry.register_hook(|_, types| {
        if let Some(index) = types.iter().position(|t| t == "number") {
            let number = types.remove(index);
            types.insert(0, number);
        }
    });

    let mut condition = Condition::new(Arc::new(SearchCondition), "search");
    condition.set_rules(
        vec![
            RuleInput::Config(json!({ "type": "text", "uid": "r1", "value": "rust" })),
            RuleInput::Config(json!({ "type": "date", "uid": "r2", "after": "2024-01-01" })),
        ],
        &services,
    )?;

    println!("初始配置:");
    println!("{}", serde_json::to_string_pretty(&condition.get_config())?);

    // 不指定类型，取第一个候选（钩子排序后是 number）
    let view = apply_edit(
        &mut condition,
        EditAction::AddRule { type_name: None },
        &services,
    )?;
    println!("\n添加规则后的视图:");
    println!("{}", serde_json::to_string_pretty(&view)?);

    let view = apply_edit(
        &mut condition,
        EditAction::RemoveRule {
            uid: "r1".to_string(),
        },
        &services,
    )?;
    println!("\n移除 r1 后的视图:");
    println!("{}", serde_json::to_string_pretty(&view)?);

    // 配置往返
    let config = condition.get_config();
    let rebuilt = Condition::from_config(&config, &services)?;
    assert_eq!(rebuilt.get_config(), config);
    println!("\n配置往返一致");

    Ok(())
}
