use anyhow::Result;
use eventdesk_core::store::EventStore;
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run<S: EventStore>(store: &S) -> Result<()> {
    let categories = store.list_categories().await?;

    if categories.is_empty() {
        println!("{}", "No categories found".dimmed());
        return Ok(());
    }

    for category in &categories {
        println!("{}", category.render());
    }
    Ok(())
}
