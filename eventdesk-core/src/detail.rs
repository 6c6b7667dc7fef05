//! Event Detail view-model.
//!
//! Resolves one event id into a fully populated read view and drives the
//! edit/save/cancel/delete cycle against the Event Store.
//!
//! Loading is split into a `PendingLoad` (which owns everything needed to
//! talk to the store) and `EventDetail::apply`. Every retarget bumps a
//! generation counter, and `apply` drops any outcome whose ticket is not
//! from the current generation, so a late response for one id can never
//! overwrite the view of another. Dropping the `EventDetail` discards all
//! state; outcomes that arrive afterwards have nothing to apply to.

use std::mem;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{Category, Creator, DraftField, Event, UNKNOWN_CREATOR};
use crate::id::Id;
use crate::shell::{LISTING_ROUTE, NoticeKind, Shell};
use crate::store::EventStore;

pub const UPDATED: &str = "Event updated successfully!";
pub const UPDATE_FAILED: &str = "Failed to update event";
pub const DELETED: &str = "Event deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete event";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this event?";

/// Everything the read view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub event: Event,
    /// `None` when the event names no creator.
    pub creator: Option<Creator>,
    /// Snapshot of all categories at load time.
    pub categories: Vec<Category>,
}

impl Detail {
    /// Names of the event's categories in `category_ids` order, joined with
    /// ", ". Ids without a matching category are skipped.
    pub fn category_names(&self) -> String {
        self.event
            .category_ids
            .iter()
            .filter_map(|id| self.categories.iter().find(|c| &c.id == id))
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn creator_label(&self) -> &str {
        self.creator
            .as_ref()
            .map(Creator::display_name)
            .unwrap_or(UNKNOWN_CREATOR)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Loaded(Detail),
    Editing {
        draft: Event,
        /// Restored on cancel.
        baseline: Detail,
    },
    Error(String),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Loaded(_) => "loaded",
            ViewState::Editing { .. } => "editing",
            ViewState::Error(_) => "in error",
        }
    }

    /// The detail currently on screen, if any.
    pub fn detail(&self) -> Option<&Detail> {
        match self {
            ViewState::Loaded(detail) => Some(detail),
            ViewState::Editing { baseline, .. } => Some(baseline),
            _ => None,
        }
    }
}

/// Identifies which load a response belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub event_id: Id,
    generation: u64,
}

/// A load that has been issued but not yet run.
#[must_use = "a pending load does nothing until it is run and applied"]
pub struct PendingLoad<S> {
    ticket: LoadTicket,
    store: Arc<S>,
}

impl<S: EventStore> PendingLoad<S> {
    pub fn ticket(&self) -> &LoadTicket {
        &self.ticket
    }

    pub async fn run(self) -> LoadOutcome {
        let result = fetch_detail(self.store.as_ref(), &self.ticket.event_id).await;
        LoadOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: EventDeskResult<Detail>,
}

/// Fetch the event, its creator and all categories.
///
/// The category list is requested alongside the event; the creator request
/// waits for the event since that is where its id comes from. Any failure
/// fails the whole load.
pub async fn fetch_detail<S: EventStore>(store: &S, event_id: &Id) -> EventDeskResult<Detail> {
    let event_and_creator = async {
        let event = store.get_event(event_id).await?;
        let creator = match &event.created_by {
            Some(creator_id) => Some(store.get_user(creator_id).await?),
            None => None,
        };
        Ok::<_, EventDeskError>((event, creator))
    };

    let ((event, creator), categories) =
        tokio::try_join!(event_and_creator, store.list_categories())?;

    Ok(Detail {
        event,
        creator,
        categories,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user answered no; nothing was sent.
    Declined,
}

pub struct EventDetail<S, H> {
    store: Arc<S>,
    shell: Arc<H>,
    event_id: Id,
    generation: u64,
    state: ViewState,
}

impl<S: EventStore, H: Shell> EventDetail<S, H> {
    /// Mount the view for `event_id`. The returned load must be run and
    /// applied to leave `Loading`.
    pub fn mount(
        store: Arc<S>,
        shell: Arc<H>,
        event_id: Id,
    ) -> EventDeskResult<(Self, PendingLoad<S>)> {
        check_id(&event_id)?;
        let view = EventDetail {
            store,
            shell,
            event_id,
            generation: 0,
            state: ViewState::Loading,
        };
        let pending = view.pending();
        Ok((view, pending))
    }

    /// Mount and load in one go.
    pub async fn open(store: Arc<S>, shell: Arc<H>, event_id: Id) -> EventDeskResult<Self> {
        let (mut view, pending) = Self::mount(store, shell, event_id)?;
        let outcome = pending.run().await;
        view.apply(outcome);
        Ok(view)
    }

    /// Point the view at another event. Loads already in flight become stale.
    pub fn retarget(&mut self, event_id: Id) -> EventDeskResult<PendingLoad<S>> {
        check_id(&event_id)?;
        self.event_id = event_id;
        Ok(self.reload())
    }

    /// Issue a fresh load of the current event, e.g. when the user retries
    /// after an error. Loads are never retried automatically.
    pub fn reload(&mut self) -> PendingLoad<S> {
        self.generation += 1;
        self.state = ViewState::Loading;
        self.pending()
    }

    fn pending(&self) -> PendingLoad<S> {
        PendingLoad {
            ticket: LoadTicket {
                event_id: self.event_id.clone(),
                generation: self.generation,
            },
            store: Arc::clone(&self.store),
        }
    }

    /// Apply a finished load. Returns false if the outcome was stale and
    /// has been discarded.
    pub fn apply(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.ticket.generation != self.generation
            || outcome.ticket.event_id != self.event_id
            || !matches!(self.state, ViewState::Loading)
        {
            debug!(
                event_id = %outcome.ticket.event_id,
                current = %self.event_id,
                "discarding stale load"
            );
            return false;
        }

        self.state = match outcome.result {
            Ok(detail) => ViewState::Loaded(detail),
            Err(e) => {
                warn!(event_id = %self.event_id, error = %e, "failed to load event");
                ViewState::Error(e.to_string())
            }
        };
        true
    }

    /// Tear the view down. Later load outcomes are dropped with it.
    pub fn unmount(self) {
        debug!(event_id = %self.event_id, "unmounting event detail");
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn event_id(&self) -> &Id {
        &self.event_id
    }

    pub fn begin_edit(&mut self) -> EventDeskResult<()> {
        let ViewState::Loaded(detail) = &self.state else {
            return Err(self.invalid("edit"));
        };
        let detail = detail.clone();
        self.state = ViewState::Editing {
            draft: detail.event.clone(),
            baseline: detail,
        };
        Ok(())
    }

    pub fn draft(&self) -> Option<&Event> {
        match &self.state {
            ViewState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Set one draft field. Validation waits until save.
    pub fn update_draft_field(
        &mut self,
        field: DraftField,
        value: impl Into<String>,
    ) -> EventDeskResult<()> {
        let value = value.into();
        self.replace_draft("update a field", |draft| draft.with_field(field, value))
    }

    /// Add or remove one category from the draft.
    pub fn toggle_category(&mut self, category: &Id, member: bool) -> EventDeskResult<()> {
        self.replace_draft("change categories", |draft| {
            draft.with_category(category, member)
        })
    }

    fn replace_draft(
        &mut self,
        operation: &'static str,
        change: impl FnOnce(Event) -> Event,
    ) -> EventDeskResult<()> {
        let ViewState::Editing { draft, .. } = &mut self.state else {
            return Err(self.invalid(operation));
        };
        *draft = change(mem::take(draft));
        Ok(())
    }

    /// Write the draft back. The server's answer becomes the loaded event.
    ///
    /// On failure the view stays in `Editing` with the draft intact.
    pub async fn save(&mut self) -> EventDeskResult<()> {
        let ViewState::Editing { draft, .. } = &self.state else {
            return Err(self.invalid("save"));
        };
        draft.validate()?;

        let result = self.store.update_event(&self.event_id, draft).await;
        match result {
            Ok(updated) => {
                if let ViewState::Editing { baseline, .. } =
                    mem::replace(&mut self.state, ViewState::Loading)
                {
                    self.state = ViewState::Loaded(Detail {
                        event: updated,
                        ..baseline
                    });
                }
                self.shell.notify(NoticeKind::Success, UPDATED);
                Ok(())
            }
            Err(e) => {
                warn!(event_id = %self.event_id, error = %e, "update failed");
                self.shell.notify(NoticeKind::Error, UPDATE_FAILED);
                Err(e)
            }
        }
    }

    /// Drop the draft and go back to the last loaded event.
    pub fn cancel_edit(&mut self) -> EventDeskResult<()> {
        if !matches!(self.state, ViewState::Editing { .. }) {
            return Err(self.invalid("cancel"));
        }
        if let ViewState::Editing { baseline, .. } =
            mem::replace(&mut self.state, ViewState::Loading)
        {
            self.state = ViewState::Loaded(baseline);
        }
        Ok(())
    }

    /// Delete the event after the user confirms, then return to the listing.
    ///
    /// On failure the view stays `Loaded`.
    pub async fn delete(&mut self) -> EventDeskResult<DeleteOutcome> {
        if !matches!(self.state, ViewState::Loaded(_)) {
            return Err(self.invalid("delete"));
        }

        if !self.shell.confirm(DELETE_PROMPT).await {
            debug!(event_id = %self.event_id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        match self.store.delete_event(&self.event_id).await {
            Ok(()) => {
                self.shell.notify(NoticeKind::Success, DELETED);
                self.shell.go_to(LISTING_ROUTE);
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                warn!(event_id = %self.event_id, error = %e, "delete failed");
                self.shell.notify(NoticeKind::Error, DELETE_FAILED);
                Err(e)
            }
        }
    }

    pub fn back_to_listing(&self) {
        self.shell.go_to(LISTING_ROUTE);
    }

    fn invalid(&self, operation: &'static str) -> EventDeskError {
        EventDeskError::InvalidState {
            operation,
            state: self.state.name(),
        }
    }
}

fn check_id(event_id: &Id) -> EventDeskResult<()> {
    if event_id.is_empty() {
        return Err(EventDeskError::Validation("Event id must not be empty".into()));
    }
    Ok(())
}
