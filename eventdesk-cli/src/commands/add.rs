use std::sync::Arc;

use anyhow::Result;
use eventdesk_core::form::EventForm;
use eventdesk_core::shell::{ADD_EVENT_ROUTE, Shell};
use eventdesk_core::store::EventStore;
use eventdesk_core::{DraftField, EventDeskError};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::commands::EventArgs;
use crate::render::Render;
use crate::utils::prompt;

pub async fn run<S: EventStore, H: Shell>(store: Arc<S>, shell: Arc<H>, args: EventArgs) -> Result<()> {
    debug!(route = ADD_EVENT_ROUTE, "opening add-event form");
    let mut form = EventForm::open(store, shell).await;
    let interactive = args.is_empty();

    if interactive {
        for (field, value) in prompt::fields(form.draft())? {
            form.update_field(field, value);
        }
        let options = form.categories().to_vec();
        for (category, member) in prompt::categories(&options, form.draft())? {
            form.toggle_category(&category, member);
        }
    } else {
        for (field, value) in args.changes()? {
            form.update_field(field, value);
        }
        for category in args.category_ids() {
            form.toggle_category(&category, true);
        }
    }

    let created = loop {
        let result = form.submit().await;
        match result {
            Ok(created) => break created,
            Err(EventDeskError::Validation(msg)) if interactive => {
                eprintln!("  {}", msg.red());
                let title = prompt::field_value(DraftField::Title, "")?;
                form.update_field(DraftField::Title, title);
            }
            Err(e) if interactive && e.is_remote() && prompt::retry(&e.to_string())? => {}
            Err(e) => return Err(e.into()),
        }
    };

    println!("{}", created.render());
    Ok(())
}
