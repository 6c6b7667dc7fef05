//! HttpEventStore against an in-process backend.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};
use eventdesk_core::detail::{EventDetail, ViewState};
use eventdesk_core::shell::{NoticeKind, Shell};
use eventdesk_core::store::{EventStore, HttpEventStore};
use eventdesk_core::{DraftField, Event, EventDeskError, Id};
use serde_json::{Value, json};

const SLOW_ID: i64 = 999;
const BROKEN_ID: i64 = 500;

#[derive(Clone)]
struct Backend {
    events: Arc<Mutex<BTreeMap<i64, Value>>>,
    requests: Arc<Mutex<Vec<String>>>,
    content_types: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    fn seeded() -> Self {
        let mut events = BTreeMap::new();
        events.insert(
            1,
            json!({
                "id": 1,
                "createdBy": 2,
                "title": "Summer Fest",
                "description": "Outdoor music",
                "image": "https://example.com/fest.jpg",
                "categoryIds": [1, 3],
                "location": "Park",
                "startTime": "2023-07-01T16:00",
                "endTime": "2023-07-01T23:00"
            }),
        );
        events.insert(
            2,
            json!({ "id": 2, "createdBy": 7, "title": "Ghost Event", "categoryIds": [] }),
        );
        Backend {
            events: Arc::new(Mutex::new(events)),
            requests: Arc::default(),
            content_types: Arc::default(),
        }
    }

    fn log(&self, line: String) {
        self.requests.lock().unwrap().push(line);
    }

    fn record_content_type(&self, headers: &HeaderMap) {
        let value = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        self.content_types.lock().unwrap().push(value);
    }
}

async fn list_events(State(b): State<Backend>) -> Json<Vec<Value>> {
    b.log("GET /events".into());
    Json(b.events.lock().unwrap().values().cloned().collect())
}

async fn create_event(
    State(b): State<Backend>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    b.log("POST /events".into());
    b.record_content_type(&headers);
    if body.get("id").is_some() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut events = b.events.lock().unwrap();
    let id = events.keys().next_back().copied().unwrap_or(0) + 1;
    body["id"] = json!(id);
    events.insert(id, body.clone());
    Ok((StatusCode::CREATED, Json(body)))
}

async fn get_event(
    State(b): State<Backend>,
    Path(raw): Path<String>,
) -> Result<Json<Value>, (StatusCode, &'static str)> {
    b.log(format!("GET /events/{raw}"));
    let Ok(id) = raw.parse::<i64>() else {
        return Err((StatusCode::NOT_FOUND, "{}"));
    };
    if id == SLOW_ID {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    if id == BROKEN_ID {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>"));
    }
    let event = b.events.lock().unwrap().get(&id).cloned();
    event.map(Json).ok_or((StatusCode::NOT_FOUND, "{}"))
}

async fn update_event(
    State(b): State<Backend>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    b.log(format!("PUT /events/{id}"));
    b.record_content_type(&headers);
    let mut events = b.events.lock().unwrap();
    if !events.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let title = body["title"].as_str().unwrap_or("").trim().to_string();
    body["title"] = json!(title);
    body["id"] = json!(id);
    events.insert(id, body.clone());
    Ok(Json(body))
}

async fn delete_event(State(b): State<Backend>, Path(raw): Path<String>) -> StatusCode {
    b.log(format!("DELETE /events/{raw}"));
    let Ok(id) = raw.parse::<i64>() else {
        return StatusCode::NOT_FOUND;
    };
    match b.events.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}

async fn get_user(State(b): State<Backend>, Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    b.log(format!("GET /users/{id}"));
    match id {
        2 => Ok(Json(json!({ "id": 2, "name": "Ada", "image": "https://example.com/ada.png" }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn list_categories(State(b): State<Backend>) -> Json<Value> {
    b.log("GET /categories".into());
    Json(json!([
        { "id": 1, "name": "Music" },
        { "id": 2, "name": "Food" },
        { "id": 3, "name": "Tech" }
    ]))
}

async fn serve(backend: Backend) -> String {
    let app = Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/users/{id}", get(get_user))
        .route("/categories", get(list_categories))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}/")
}

async fn store_for(backend: &Backend) -> HttpEventStore {
    let url = serve(backend.clone()).await;
    HttpEventStore::with_timeout(&url, Duration::from_secs(5)).unwrap()
}

struct QuietShell;

impl Shell for QuietShell {
    fn go_to(&self, _path: &str) {}

    fn notify(&self, _kind: NoticeKind, _message: &str) {}

    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}

#[tokio::test]
async fn reads_use_the_documented_paths() {
    let backend = Backend::seeded();
    let store = store_for(&backend).await;

    assert_eq!(store.list_events().await.unwrap().len(), 2);
    let event = store.get_event(&Id::Number(1)).await.unwrap();
    assert_eq!(event.title, "Summer Fest");
    assert_eq!(event.extra.get("location"), Some(&json!("Park")));
    assert_eq!(store.get_user(&Id::Number(2)).await.unwrap().name, "Ada");
    assert_eq!(store.list_categories().await.unwrap().len(), 3);

    assert_eq!(
        *backend.requests.lock().unwrap(),
        vec!["GET /events", "GET /events/1", "GET /users/2", "GET /categories"]
    );
}

#[tokio::test]
async fn base_url_without_trailing_slash_builds_the_same_paths() {
    let backend = Backend::seeded();
    let url = serve(backend.clone()).await;
    let store =
        HttpEventStore::with_timeout(url.trim_end_matches('/'), Duration::from_secs(5)).unwrap();

    store.get_event(&Id::Number(1)).await.unwrap();
    assert_eq!(*backend.requests.lock().unwrap(), vec!["GET /events/1"]);
}

#[test]
fn unusable_base_url_is_a_config_error() {
    for url in ["not a url", "mailto:events@example.com"] {
        assert!(matches!(
            HttpEventStore::with_timeout(url, Duration::from_secs(1)),
            Err(EventDeskError::Config(_))
        ));
    }
}

#[tokio::test]
async fn text_ids_stay_a_single_path_segment() {
    let backend = Backend::seeded();
    let store = store_for(&backend).await;

    for raw in ["x/../1", "a?b", "1#frag"] {
        let id = Id::Text(raw.into());
        assert!(matches!(
            store.get_event(&id).await,
            Err(EventDeskError::NotFound { resource: "Event", .. })
        ));
    }
    assert!(matches!(
        store.delete_event(&Id::Text("x/../1".into())).await,
        Err(EventDeskError::NotFound { .. })
    ));

    assert!(backend.events.lock().unwrap().contains_key(&1));
    assert_eq!(
        *backend.requests.lock().unwrap(),
        vec![
            "GET /events/x/../1",
            "GET /events/a?b",
            "GET /events/1#frag",
            "DELETE /events/x/../1",
        ]
    );
}

#[tokio::test]
async fn writes_send_json() {
    let backend = Backend::seeded();
    let store = store_for(&backend).await;

    let new_event = Event::blank().with_field(DraftField::Title, "Board Games");
    let created = store.create_event(&new_event).await.unwrap();
    assert_eq!(created.id, Some(Id::Number(3)));

    let mut event = store.get_event(&Id::Number(1)).await.unwrap();
    event.title = " Renamed ".into();
    let updated = store.update_event(&Id::Number(1), &event).await.unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.extra.get("location"), Some(&json!("Park")));

    store.delete_event(&Id::Number(3)).await.unwrap();

    let content_types = backend.content_types.lock().unwrap().clone();
    assert_eq!(content_types.len(), 2);
    assert!(content_types.iter().all(|ct| ct.starts_with("application/json")));
    assert!(!backend.events.lock().unwrap().contains_key(&3));
}

#[tokio::test]
async fn missing_records_map_to_not_found() {
    let backend = Backend::seeded();
    let store = store_for(&backend).await;

    assert!(matches!(
        store.get_event(&Id::Number(42)).await,
        Err(EventDeskError::NotFound { resource: "Event", .. })
    ));
    assert!(matches!(
        store.get_user(&Id::Number(7)).await,
        Err(EventDeskError::NotFound { resource: "User", .. })
    ));
    assert!(matches!(
        store.delete_event(&Id::Number(42)).await,
        Err(EventDeskError::NotFound { .. })
    ));
}

#[tokio::test]
async fn error_bodies_are_not_parsed() {
    let backend = Backend::seeded();
    let store = store_for(&backend).await;

    assert!(matches!(
        store.get_event(&Id::Number(BROKEN_ID)).await,
        Err(EventDeskError::Response { status: 500 })
    ));
}

#[tokio::test]
async fn slow_backend_times_out_as_transport_error() {
    let backend = Backend::seeded();
    let url = serve(backend).await;
    let store = HttpEventStore::with_timeout(&url, Duration::from_millis(200)).unwrap();

    let err = store.get_event(&Id::Number(SLOW_ID)).await.unwrap_err();
    assert!(matches!(&err, EventDeskError::Transport(msg) if msg.contains("timed out")));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store =
        HttpEventStore::with_timeout(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let err = store.list_events().await.unwrap_err();
    assert!(matches!(err, EventDeskError::Transport(_)));
    assert!(err.is_remote());
}

#[tokio::test]
async fn detail_view_loads_and_saves_over_http() {
    let backend = Backend::seeded();
    let store = Arc::new(store_for(&backend).await);

    let mut view = EventDetail::open(Arc::clone(&store), Arc::new(QuietShell), Id::Number(1))
        .await
        .unwrap();
    let ViewState::Loaded(detail) = view.state() else {
        panic!("expected loaded, got {:?}", view.state());
    };
    assert_eq!(detail.category_names(), "Music, Tech");
    assert_eq!(detail.creator_label(), "Ada");

    view.begin_edit().unwrap();
    view.update_draft_field(DraftField::Title, "Summer Fest 2  ").unwrap();
    view.save().await.unwrap();
    assert_eq!(view.state().detail().unwrap().event.title, "Summer Fest 2");
    assert_eq!(backend.events.lock().unwrap()[&1]["location"], "Park");
}

#[tokio::test]
async fn detail_view_fails_when_creator_is_missing() {
    let backend = Backend::seeded();
    let store = Arc::new(store_for(&backend).await);

    let view = EventDetail::open(store, Arc::new(QuietShell), Id::Number(2))
        .await
        .unwrap();
    assert!(matches!(view.state(), ViewState::Error(reason) if reason == "User not found: 7"));
}
