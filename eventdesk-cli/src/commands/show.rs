use std::sync::Arc;

use anyhow::Result;
use eventdesk_core::Id;
use eventdesk_core::shell::Shell;
use eventdesk_core::store::EventStore;

use crate::commands::open_detail;
use crate::render::Render;

pub async fn run<S: EventStore, H: Shell>(
    store: Arc<S>,
    shell: Arc<H>,
    id: Id,
    back: bool,
) -> Result<()> {
    let view = open_detail(store, shell, id).await?;
    if let Some(detail) = view.state().detail() {
        println!("{}", detail.render());
    }
    if back {
        view.back_to_listing();
    }
    view.unmount();
    Ok(())
}
