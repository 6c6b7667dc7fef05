//! In-memory store and recording shell for view-model tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{Category, Creator, Event};
use crate::id::Id;
use crate::shell::{NoticeKind, Shell};
use crate::store::EventStore;

#[derive(Default)]
pub struct FakeStore {
    pub events: Mutex<HashMap<Id, Event>>,
    pub users: Mutex<HashMap<Id, Creator>>,
    pub categories: Mutex<Vec<Category>>,
    /// Requests in the order they were issued, e.g. "GET /events/1".
    pub calls: Mutex<Vec<String>>,
    /// Paths that answer with the given status instead of data.
    pub failures: Mutex<HashMap<String, u16>>,
    /// Paths that take this long to answer.
    pub delays: Mutex<HashMap<String, Duration>>,
    next_id: Mutex<i64>,
}

impl FakeStore {
    pub fn seeded() -> Self {
        let store = FakeStore::default();
        {
            let mut events = store.events.lock().unwrap();
            events.insert(Id::Number(1), event(1, "Summer Fest", 2, &[1, 3, 9]));
            events.insert(Id::Number(2), event(2, "Tech Talk", 3, &[3]));
            events.insert(Id::Number(3), event(3, "Food Festival", 2, &[2]));
        }
        {
            let mut users = store.users.lock().unwrap();
            users.insert(Id::Number(2), creator(2, "Ada"));
            users.insert(Id::Number(3), creator(3, "Linus"));
        }
        *store.categories.lock().unwrap() = vec![
            category(1, "Music"),
            category(2, "Food"),
            category(3, "Tech"),
        ];
        *store.next_id.lock().unwrap() = 100;
        store
    }

    pub fn fail(&self, path: &str, status: u16) {
        self.failures.lock().unwrap().insert(path.to_string(), status);
    }

    pub fn delay(&self, path: &str, by: Duration) {
        self.delays.lock().unwrap().insert(path.to_string(), by);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("GET"))
            .collect()
    }

    async fn enter(&self, method: &str, path: String) -> EventDeskResult<()> {
        self.calls.lock().unwrap().push(format!("{method} {path}"));
        let delay = self.delays.lock().unwrap().get(&path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let status = self.failures.lock().unwrap().get(&path).copied();
        match status {
            Some(0) => Err(EventDeskError::Transport("connection refused".into())),
            Some(status) => Err(EventDeskError::Response { status }),
            None => Ok(()),
        }
    }
}

impl EventStore for FakeStore {
    async fn list_events(&self) -> EventDeskResult<Vec<Event>> {
        self.enter("GET", "/events".into()).await?;
        let mut events: Vec<Event> = self.events.lock().unwrap().values().cloned().collect();
        events.sort_by_key(|e| e.id.as_ref().map(|id| id.to_string()));
        Ok(events)
    }

    async fn get_event(&self, id: &Id) -> EventDeskResult<Event> {
        self.enter("GET", format!("/events/{id}")).await?;
        self.events
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| EventDeskError::NotFound {
                resource: "Event",
                id: id.clone(),
            })
    }

    async fn create_event(&self, event: &Event) -> EventDeskResult<Event> {
        self.enter("POST", "/events".into()).await?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            Id::Number(*next)
        };
        let created = Event {
            id: Some(id.clone()),
            ..event.clone()
        };
        self.events.lock().unwrap().insert(id, created.clone());
        Ok(created)
    }

    async fn update_event(&self, id: &Id, event: &Event) -> EventDeskResult<Event> {
        self.enter("PUT", format!("/events/{id}")).await?;
        // Server-side normalization, so tests can tell server data from the draft.
        let stored = Event {
            id: Some(id.clone()),
            title: event.title.trim().to_string(),
            ..event.clone()
        };
        self.events.lock().unwrap().insert(id.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete_event(&self, id: &Id) -> EventDeskResult<()> {
        self.enter("DELETE", format!("/events/{id}")).await?;
        self.events.lock().unwrap().remove(id);
        Ok(())
    }

    async fn get_user(&self, id: &Id) -> EventDeskResult<Creator> {
        self.enter("GET", format!("/users/{id}")).await?;
        self.users
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| EventDeskError::NotFound {
                resource: "User",
                id: id.clone(),
            })
    }

    async fn list_categories(&self) -> EventDeskResult<Vec<Category>> {
        self.enter("GET", "/categories".into()).await?;
        Ok(self.categories.lock().unwrap().clone())
    }
}

/// Shell that records everything and answers confirmations with a fixed value.
pub struct RecordingShell {
    pub answer: bool,
    pub routes: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<(NoticeKind, String)>>,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingShell {
    pub fn answering(answer: bool) -> Self {
        RecordingShell {
            answer,
            routes: Mutex::default(),
            notices: Mutex::default(),
            prompts: Mutex::default(),
        }
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Shell for RecordingShell {
    fn go_to(&self, path: &str) {
        self.routes.lock().unwrap().push(path.to_string());
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.lock().unwrap().push((kind, message.to_string()));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }
}

pub fn event(id: i64, title: &str, created_by: i64, categories: &[i64]) -> Event {
    Event {
        id: Some(Id::Number(id)),
        title: title.to_string(),
        description: Some(format!("About {title}")),
        image: Some(format!("https://example.com/{id}.jpg")),
        start_time: Some("2024-03-20T15:00".into()),
        end_time: Some("2024-03-20T17:00".into()),
        category_ids: categories.iter().map(|c| Id::Number(*c)).collect(),
        created_by: Some(Id::Number(created_by)),
        extra: Default::default(),
    }
}

pub fn creator(id: i64, name: &str) -> Creator {
    Creator {
        id: Id::Number(id),
        name: name.to_string(),
        image: None,
    }
}

pub fn category(id: i64, name: &str) -> Category {
    Category {
        id: Id::Number(id),
        name: name.to_string(),
    }
}
