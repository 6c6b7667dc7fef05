use std::sync::Arc;

use anyhow::Result;
use eventdesk_core::detail::EventDetail;
use eventdesk_core::shell::Shell;
use eventdesk_core::store::EventStore;
use eventdesk_core::{DraftField, EventDeskError, Id};
use owo_colors::OwoColorize;

use crate::commands::{EventArgs, open_detail};
use crate::render::Render;
use crate::utils::prompt;

pub async fn run<S: EventStore, H: Shell>(
    store: Arc<S>,
    shell: Arc<H>,
    id: Id,
    args: EventArgs,
    remove_categories: Vec<String>,
) -> Result<()> {
    let mut view = open_detail(store, shell, id).await?;
    let interactive = args.is_empty() && remove_categories.is_empty();

    view.begin_edit()?;
    if interactive {
        prompt_draft(&mut view)?;
    } else {
        for (field, value) in args.changes()? {
            view.update_draft_field(field, value)?;
        }
        for category in args.category_ids() {
            view.toggle_category(&category, true)?;
        }
        for category in &remove_categories {
            view.toggle_category(&Id::from(category.as_str()), false)?;
        }
    }

    loop {
        let result = view.save().await;
        match result {
            Ok(()) => break,
            Err(EventDeskError::Validation(msg)) if interactive => {
                eprintln!("  {}", msg.red());
                let title = prompt::field_value(DraftField::Title, "")?;
                view.update_draft_field(DraftField::Title, title)?;
            }
            // The view-model has already shown the failure.
            Err(e) if interactive && e.is_remote() && prompt::retry(&e.to_string())? => {}
            Err(e) => {
                view.cancel_edit()?;
                return Err(e.into());
            }
        }
    }

    if let Some(detail) = view.state().detail() {
        println!();
        println!("{}", detail.render());
    }
    Ok(())
}

fn prompt_draft<S: EventStore, H: Shell>(view: &mut EventDetail<S, H>) -> Result<()> {
    let (Some(draft), Some(detail)) = (view.draft().cloned(), view.state().detail().cloned())
    else {
        return Ok(());
    };

    for (field, value) in prompt::fields(&draft)? {
        view.update_draft_field(field, value)?;
    }
    for (category, member) in prompt::categories(&detail.categories, &draft)? {
        view.toggle_category(&category, member)?;
    }
    Ok(())
}
