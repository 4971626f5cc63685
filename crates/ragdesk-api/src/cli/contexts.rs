//! Known-contexts listing: `ragdesk contexts`.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use crate::state::AppState;

/// List known contexts, marking the built-in default.
pub async fn list_contexts(state: &AppState, json: bool) -> Result<()> {
    let registry = state.manual_service.registry();
    let names = registry.list().await?;
    let default_name = registry.default_name();

    if json {
        let rows: Vec<_> = names
            .iter()
            .map(|name| serde_json::json!({ "name": name, "default": name == default_name }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Context").fg(Color::White),
        Cell::new("Default").fg(Color::White),
    ]);

    for name in &names {
        let is_default = name == default_name;
        table.add_row(vec![
            Cell::new(name).fg(Color::Cyan),
            Cell::new(if is_default { "✓" } else { "" }).fg(Color::Green),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} context{}. Register more with: {}",
        style(names.len()).bold(),
        if names.len() == 1 { "" } else { "s" },
        style("ragdesk upload --company NAME PATH").yellow()
    );
    println!(
        "  {}",
        style(format!("Stored in {}", registry.store().path().display())).dim()
    );
    println!();

    Ok(())
}
