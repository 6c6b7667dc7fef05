//! Add-event form.

use std::sync::Arc;

use tracing::warn;

use crate::error::EventDeskResult;
use crate::event::{Category, DraftField, Event};
use crate::id::Id;
use crate::shell::{LISTING_ROUTE, NoticeKind, Shell};
use crate::store::EventStore;

pub const ADDED: &str = "Event added successfully";
pub const ADD_FAILED: &str = "Error adding event";

pub struct EventForm<S, H> {
    store: Arc<S>,
    shell: Arc<H>,
    draft: Event,
    categories: Vec<Category>,
}

impl<S: EventStore, H: Shell> EventForm<S, H> {
    /// Open an empty form. Category options come from the store; if they
    /// cannot be fetched the form still opens, with no options.
    pub async fn open(store: Arc<S>, shell: Arc<H>) -> Self {
        let categories = store.list_categories().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to fetch categories");
            Vec::new()
        });

        EventForm {
            store,
            shell,
            draft: Event::blank(),
            categories,
        }
    }

    pub fn draft(&self) -> &Event {
        &self.draft
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft = std::mem::take(&mut self.draft).with_field(field, value);
    }

    pub fn toggle_category(&mut self, category: &Id, member: bool) {
        self.draft = std::mem::take(&mut self.draft).with_category(category, member);
    }

    /// Create the event. On success the shell goes back to the listing; on
    /// failure the form keeps its contents.
    pub async fn submit(&mut self) -> EventDeskResult<Event> {
        self.draft.validate()?;

        match self.store.create_event(&self.draft).await {
            Ok(created) => {
                self.shell.notify(NoticeKind::Success, ADDED);
                self.shell.go_to(LISTING_ROUTE);
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, "failed to add event");
                self.shell
                    .notify(NoticeKind::Error, &format!("{ADD_FAILED}: {e}"));
                Err(e)
            }
        }
    }
}

impl<S, H> std::fmt::Debug for EventForm<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventForm")
            .field("draft", &self.draft)
            .field("categories", &self.categories)
            .finish_non_exhaustive()
    }
}
