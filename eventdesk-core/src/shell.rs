//! Capabilities a front end lends to the view-models.

use std::future::Future;

/// Route of the events listing.
pub const LISTING_ROUTE: &str = "/";

/// Route of the add-event flow.
pub const ADD_EVENT_ROUTE: &str = "/add-event";

/// Route of one event's detail view.
pub fn event_route(id: &crate::Id) -> String {
    format!("/event/{id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Navigation, notifications and confirmation, provided by the front end.
///
/// View-models call these but never implement them, which keeps them
/// testable without a real UI.
pub trait Shell: Send + Sync {
    fn go_to(&self, path: &str);

    /// Show a transient, dismissible notification.
    fn notify(&self, kind: NoticeKind, message: &str);

    /// Ask a yes/no question and wait for the answer.
    fn confirm(&self, message: &str) -> impl Future<Output = bool> + Send;
}
