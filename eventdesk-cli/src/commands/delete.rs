use std::sync::Arc;

use anyhow::Result;
use eventdesk_core::Id;
use eventdesk_core::detail::DeleteOutcome;
use eventdesk_core::shell::Shell;
use eventdesk_core::store::EventStore;
use owo_colors::OwoColorize;

use crate::commands::open_detail;
use crate::render::Render;

pub async fn run<S: EventStore, H: Shell>(store: Arc<S>, shell: Arc<H>, id: Id) -> Result<()> {
    let mut view = open_detail(store, shell, id).await?;
    if let Some(detail) = view.state().detail() {
        println!("{}", detail.render());
        println!();
    }

    match view.delete().await? {
        DeleteOutcome::Deleted => {}
        DeleteOutcome::Declined => println!("{}", "Nothing deleted".dimmed()),
    }
    Ok(())
}
