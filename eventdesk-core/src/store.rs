//! Event Store client.
//!
//! `EventStore` is the REST contract the view-models are written against;
//! `HttpEventStore` speaks it over HTTP with reqwest.
//!
//! | Operation       | Request               |
//! |-----------------|-----------------------|
//! | list events     | `GET /events`         |
//! | get event       | `GET /events/{id}`    |
//! | create event    | `POST /events`        |
//! | update event    | `PUT /events/{id}`    |
//! | delete event    | `DELETE /events/{id}` |
//! | get user        | `GET /users/{id}`     |
//! | list categories | `GET /categories`     |

use std::future::Future;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{EventDeskError, EventDeskResult};
use crate::event::{Category, Creator, Event};
use crate::id::Id;

/// CRUD access to events, creators and categories.
pub trait EventStore: Send + Sync {
    fn list_events(&self) -> impl Future<Output = EventDeskResult<Vec<Event>>> + Send;

    fn get_event(&self, id: &Id) -> impl Future<Output = EventDeskResult<Event>> + Send;

    /// `event.id` is ignored; the store assigns one.
    fn create_event(&self, event: &Event) -> impl Future<Output = EventDeskResult<Event>> + Send;

    fn update_event(
        &self,
        id: &Id,
        event: &Event,
    ) -> impl Future<Output = EventDeskResult<Event>> + Send;

    fn delete_event(&self, id: &Id) -> impl Future<Output = EventDeskResult<()>> + Send;

    fn get_user(&self, id: &Id) -> impl Future<Output = EventDeskResult<Creator>> + Send;

    fn list_categories(&self) -> impl Future<Output = EventDeskResult<Vec<Category>>> + Send;
}

/// HTTP client for the Event Store.
#[derive(Clone)]
pub struct HttpEventStore {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpEventStore {
    pub fn new(settings: &Settings) -> EventDeskResult<Self> {
        Self::with_timeout(&settings.api_url, settings.timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> EventDeskResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| EventDeskError::Config(format!("Invalid api_url \"{base_url}\": {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(EventDeskError::Config(format!(
                "api_url \"{base_url}\" cannot carry a path"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EventDeskError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base path. Each segment is percent-encoded,
    /// so an id containing `/`, `?` or `..` stays a single path segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `with_timeout`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!(%method, %url, "event store request");
        self.http.request(method, url)
    }

    /// Send and check the status. Error bodies are never parsed.
    async fn send(
        &self,
        request: RequestBuilder,
        missing: Option<(&'static str, &Id)>,
    ) -> EventDeskResult<Response> {
        let resp = request.send().await.map_err(transport_error)?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        warn!(status = status.as_u16(), url = %resp.url(), "event store request failed");
        match missing {
            Some((resource, id)) if status == StatusCode::NOT_FOUND => {
                Err(EventDeskError::NotFound {
                    resource,
                    id: id.clone(),
                })
            }
            _ => Err(EventDeskError::Response {
                status: status.as_u16(),
            }),
        }
    }

    async fn json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        missing: Option<(&'static str, &Id)>,
    ) -> EventDeskResult<T> {
        let resp = self.send(request, missing).await?;
        resp.json().await.map_err(|e| {
            if e.is_decode() {
                EventDeskError::Serialization(e.to_string())
            } else {
                transport_error(e)
            }
        })
    }
}

impl EventStore for HttpEventStore {
    async fn list_events(&self) -> EventDeskResult<Vec<Event>> {
        self.json(self.request(Method::GET, &["events"]), None).await
    }

    async fn get_event(&self, id: &Id) -> EventDeskResult<Event> {
        self.json(
            self.request(Method::GET, &["events", &*id.as_key()]),
            Some(("Event", id)),
        )
        .await
    }

    async fn create_event(&self, event: &Event) -> EventDeskResult<Event> {
        let body = Event {
            id: None,
            ..event.clone()
        };
        self.json(self.request(Method::POST, &["events"]).json(&body), None)
            .await
    }

    async fn update_event(&self, id: &Id, event: &Event) -> EventDeskResult<Event> {
        self.json(
            self.request(Method::PUT, &["events", &*id.as_key()]).json(event),
            Some(("Event", id)),
        )
        .await
    }

    async fn delete_event(&self, id: &Id) -> EventDeskResult<()> {
        self.send(
            self.request(Method::DELETE, &["events", &*id.as_key()]),
            Some(("Event", id)),
        )
        .await?;
        Ok(())
    }

    async fn get_user(&self, id: &Id) -> EventDeskResult<Creator> {
        self.json(
            self.request(Method::GET, &["users", &*id.as_key()]),
            Some(("User", id)),
        )
        .await
    }

    async fn list_categories(&self) -> EventDeskResult<Vec<Category>> {
        self.json(self.request(Method::GET, &["categories"]), None).await
    }
}

fn transport_error(e: reqwest::Error) -> EventDeskError {
    if e.is_timeout() {
        EventDeskError::Transport(format!("request timed out: {e}"))
    } else {
        EventDeskError::Transport(e.to_string())
    }
}
