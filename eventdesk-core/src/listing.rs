//! Events listing and its filter.

use tracing::debug;

use crate::error::EventDeskError;
use crate::event::{Category, Event};
use crate::id::Id;
use crate::store::EventStore;

/// Title search plus an optional single category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub search_term: String,
    /// `None` means every category.
    pub category: Option<Id>,
}

impl EventFilter {
    /// Build a filter from raw input. An empty category selection means no
    /// category filter.
    pub fn new(search_term: impl Into<String>, category: Option<&str>) -> Self {
        EventFilter {
            search_term: search_term.into(),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(Id::from),
        }
    }

    /// Case-insensitive substring match on the title AND membership of the
    /// selected category.
    pub fn matches(&self, event: &Event) -> bool {
        let matches_search = event
            .title
            .to_lowercase()
            .contains(&self.search_term.to_lowercase());
        let matches_category = self
            .category
            .as_ref()
            .is_none_or(|category| event.has_category(category));
        matches_search && matches_category
    }

    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }
}

/// Events and category options for the listing page.
#[derive(Debug, Clone, Default)]
pub struct EventListing {
    pub events: Vec<Event>,
    pub categories: Vec<Category>,
}

impl EventListing {
    /// Fetch events and categories side by side.
    ///
    /// The two reads are independent: a failure of one still yields the
    /// other, with the failed half left empty and its error returned.
    pub async fn load<S: EventStore>(store: &S) -> (Self, Vec<EventDeskError>) {
        let (events, categories) = tokio::join!(store.list_events(), store.list_categories());

        let mut errors = Vec::new();
        let events = events.unwrap_or_else(|e| {
            debug!(error = %e, "failed to fetch events");
            errors.push(e);
            Vec::new()
        });
        let categories = categories.unwrap_or_else(|e| {
            debug!(error = %e, "failed to fetch categories");
            errors.push(e);
            Vec::new()
        });

        (EventListing { events, categories }, errors)
    }

    pub fn filtered(&self, filter: &EventFilter) -> Vec<&Event> {
        filter.apply(&self.events)
    }

    pub fn category_name(&self, id: &Id) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.as_str())
    }
}
