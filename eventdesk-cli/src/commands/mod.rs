pub mod add;
pub mod categories;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use eventdesk_core::detail::{EventDetail, ViewState};
use eventdesk_core::shell::{Shell, event_route};
use eventdesk_core::store::EventStore;
use eventdesk_core::{DraftField, Id};

use crate::utils::{datetime, tui};

/// Event fields accepted on the command line.
#[derive(Args, Debug, Default)]
pub struct EventArgs {
    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Image URL
    #[arg(short, long)]
    pub image: Option<String>,

    /// Start time (e.g. "2024-03-20T15:00" or "fri 6pm")
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time
    #[arg(short, long)]
    pub end: Option<String>,

    /// Add the event to this category (repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,
}

impl EventArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.categories.is_empty()
    }

    /// Field updates in form order. Times are normalized.
    pub fn changes(&self) -> Result<Vec<(DraftField, String)>> {
        let given = [
            (DraftField::Title, &self.title),
            (DraftField::Description, &self.description),
            (DraftField::Image, &self.image),
            (DraftField::StartTime, &self.start),
            (DraftField::EndTime, &self.end),
        ];

        given
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .map(|(field, value)| -> Result<(DraftField, String)> {
                let value = match field {
                    DraftField::StartTime | DraftField::EndTime => datetime::normalize(value)?,
                    _ => value.to_string(),
                };
                Ok((field, value))
            })
            .collect()
    }

    pub fn category_ids(&self) -> Vec<Id> {
        self.categories.iter().map(|c| Id::from(c.as_str())).collect()
    }
}

/// Load the detail view for `id`, failing the command if the load failed.
pub async fn open_detail<S: EventStore, H: Shell>(
    store: Arc<S>,
    shell: Arc<H>,
    id: Id,
) -> Result<EventDetail<S, H>> {
    let spinner = tui::create_spinner(event_route(&id));
    let view = EventDetail::open(store, shell, id).await;
    spinner.finish_and_clear();
    let view = view?;

    if let ViewState::Error(reason) = view.state() {
        anyhow::bail!("{}", reason);
    }
    Ok(view)
}
