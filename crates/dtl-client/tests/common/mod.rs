//! In-process fake of the Daily Topics backend.
//!
//! Serves the same routes as the real service from an in-memory data set and
//! records every request it receives so tests can inspect headers.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use dtl_client::{ApiClient, MemoryTokenStore, Session, TOKEN_KEY, TokenStore, USER_ID_KEY};
use serde_json::{Value, json};

pub const TOKEN: &str = "valid-token";
pub const USER_ID: &str = "u1";
pub const EMAIL: &str = "ada@example.com";

/// What the fake backend saw for one request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub content_type: Option<String>,
}

struct Data {
    requests: Vec<RecordedRequest>,
    topics: Vec<Value>,
    categories: Vec<Value>,
    users: Vec<Value>,
    favorites: HashMap<String, Vec<String>>,
    read_limit: u64,
    topics_unavailable: bool,
}

#[derive(Clone)]
pub struct FakeBackend {
    data: Arc<Mutex<Data>>,
}

impl FakeBackend {
    pub fn seeded() -> Self {
        let data = Data {
            requests: Vec::new(),
            topics: vec![
                json!({
                    "_id": "t1",
                    "title": "Ownership",
                    "content": "Every value has a single owner.",
                    "category": { "_id": "c1", "name": "Rust" },
                    "favoriteCount": 2,
                    "createdBy": { "_id": "u1", "name": "Ada" }
                }),
                json!({
                    "_id": "t2",
                    "title": "Goroutines",
                    "content": "Lightweight threads managed by the runtime.",
                    "category": "Go",
                    "favoriteCount": 1,
                    "createdBy": { "_id": "u2", "name": "Rob" }
                }),
                json!({
                    "_id": "t3",
                    "title": "Macros",
                    "content": "Code that writes code.",
                    "category": "RUST",
                    "favoriteCount": 0,
                    "createdBy": { "_id": "u1", "name": "Ada" }
                }),
            ],
            categories: vec![
                json!({ "_id": "c1", "name": "Rust", "description": "Systems programming" }),
                json!({ "_id": "c2", "name": "Go", "description": "Concurrency first" }),
            ],
            users: vec![json!({
                "_id": "u1",
                "name": "Ada",
                "email": EMAIL,
                "lastReadDate": "1709543100",
                "dailyReadCount": 1,
                "lastFavoriteAdded": null
            })],
            favorites: HashMap::from([(USER_ID.to_string(), vec!["t2".to_string()])]),
            read_limit: 5,
            topics_unavailable: false,
        };

        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    fn data(&self) -> MutexGuard<'_, Data> {
        self.data.lock().expect("fake backend state poisoned")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.data().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.data().requests.len()
    }

    pub fn favorites_of(&self, user_id: &str) -> Vec<String> {
        self.data()
            .favorites
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn favorite_count(&self, topic_id: &str) -> u64 {
        self.data()
            .topics
            .iter()
            .find(|t| t["_id"] == topic_id)
            .and_then(|t| t["favoriteCount"].as_u64())
            .unwrap_or(0)
    }

    pub fn daily_read_count(&self, user_id: &str) -> u64 {
        self.data()
            .users
            .iter()
            .find(|u| u["_id"] == user_id)
            .and_then(|u| u["dailyReadCount"].as_u64())
            .unwrap_or(0)
    }

    /// Reads at or beyond this count are rejected
    pub fn set_read_limit(&self, limit: u64) {
        self.data().read_limit = limit;
    }

    /// Make `GET /topics` answer 503 until switched back
    pub fn set_topics_unavailable(&self, unavailable: bool) {
        self.data().topics_unavailable = unavailable;
    }

    fn routes() -> Router<Self> {
        Router::new()
            .route("/topics", get(list_topics).post(create_topic))
            .route("/topics/daily", get(daily_topic))
            .route("/topics/user", get(user_topics))
            .route("/topics/{id}", get(get_topic))
            .route("/topics/{id}/read", post(mark_read))
            .route("/categories", get(list_categories).post(create_category))
            .route("/users", post(register))
            .route("/users/login", post(login))
            .route("/users/{id}", get(get_user))
            .route(
                "/users/{id}/favorites",
                get(list_favorites).post(add_favorite),
            )
            .route("/users/{id}/favorites/{topic_id}", delete(remove_favorite))
    }

    pub fn router(&self) -> Router {
        Router::new()
            .nest("/api", Self::routes())
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }

    /// Serve on an ephemeral port and return the API base URL
    pub async fn spawn(&self) -> String {
        spawn_router(self.router()).await
    }
}

/// Serve any router on an ephemeral port and return `http://addr/api`
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    format!("http://{addr}/api")
}

/// An address nothing is listening on
pub async fn closed_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    listener.local_addr().expect("Failed to read local address")
}

/// Fake backend plus a client pointed at it
pub struct TestContext {
    pub backend: FakeBackend,
    pub store: Arc<MemoryTokenStore>,
    pub client: ApiClient,
}

impl TestContext {
    /// Nothing stored: not logged in
    pub async fn anonymous() -> Self {
        let backend = FakeBackend::seeded();
        let base_url = backend.spawn().await;
        let store = Arc::new(MemoryTokenStore::new());
        let client = ApiClient::with_base_url(&base_url, store.clone())
            .expect("Failed to create client");

        Self {
            backend,
            store,
            client,
        }
    }

    /// Token and user id stored as after a successful login
    pub async fn logged_in() -> Self {
        let ctx = Self::anonymous().await;
        ctx.store.set(TOKEN_KEY, TOKEN).unwrap();
        ctx.store.set(USER_ID_KEY, USER_ID).unwrap();
        ctx
    }

    pub fn session(&self) -> Session {
        Session::new(self.client.clone())
    }
}

async fn record(State(backend): State<FakeBackend>, request: Request, next: Next) -> Response {
    let recorded = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };

        RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            authorization: header(header::AUTHORIZATION.as_str()),
            request_id: header("x-request-id"),
            content_type: header(header::CONTENT_TYPE.as_str()),
        }
    };
    backend.data().requests.push(recorded);

    next.run(request).await
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn check_auth(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(reply(
            StatusCode::UNAUTHORIZED,
            json!({ "message": "Unauthorized" }),
        )),
    }
}

async fn list_topics(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let data = backend.data();
    if data.topics_unavailable {
        return reply(
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "message": "Topics are unavailable" }),
        );
    }
    reply(StatusCode::OK, Value::Array(data.topics.clone()))
}

async fn daily_topic(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let first = backend.data().topics.first().cloned();
    match first {
        Some(topic) => reply(StatusCode::OK, topic),
        None => reply(StatusCode::NOT_FOUND, json!({})),
    }
}

async fn user_topics(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let topics: Vec<Value> = backend
        .data()
        .topics
        .iter()
        .filter(|t| t["createdBy"]["_id"] == USER_ID)
        .cloned()
        .collect();
    reply(StatusCode::OK, Value::Array(topics))
}

async fn get_topic(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let topic = backend
        .data()
        .topics
        .iter()
        .find(|t| t["_id"] == id.as_str())
        .cloned();
    match topic {
        Some(topic) => reply(StatusCode::OK, topic),
        None => reply(
            StatusCode::NOT_FOUND,
            json!({ "error": "Topic not found", "id": id }),
        ),
    }
}

async fn create_topic(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let mut data = backend.data();
    let category = data
        .categories
        .iter()
        .find(|c| c["_id"] == body["categoryId"])
        .map(|c| json!({ "_id": c["_id"], "name": c["name"] }));
    let Some(category) = category else {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "message": "Category does not exist" }),
        );
    };

    let topic = json!({
        "_id": format!("t{}", data.topics.len() + 1),
        "title": body["title"],
        "content": body["content"],
        "category": category,
        "favoriteCount": 0,
        "createdBy": { "_id": USER_ID, "name": "Ada" }
    });
    data.topics.push(topic.clone());
    reply(StatusCode::CREATED, topic)
}

async fn mark_read(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let mut data = backend.data();
    if !data.topics.iter().any(|t| t["_id"] == id.as_str()) {
        return reply(
            StatusCode::NOT_FOUND,
            json!({ "error": "Topic not found", "id": id }),
        );
    }

    let limit = data.read_limit;
    let Some(user) = data.users.iter_mut().find(|u| u["_id"] == USER_ID) else {
        return reply(StatusCode::NOT_FOUND, json!({ "message": "User not found" }));
    };
    let count = user["dailyReadCount"].as_u64().unwrap_or(0);
    if count >= limit {
        return reply(
            StatusCode::FORBIDDEN,
            json!({ "message": "Daily read limit reached" }),
        );
    }
    user["dailyReadCount"] = json!(count + 1);

    reply(
        StatusCode::OK,
        json!({ "message": "Topic marked as read", "dailyReadCount": count + 1 }),
    )
}

async fn list_categories(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let categories = backend.data().categories.clone();
    reply(StatusCode::OK, Value::Array(categories))
}

async fn create_category(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let mut data = backend.data();
    if data.categories.iter().any(|c| c["name"] == body["name"]) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "message": "Category already exists" }),
        );
    }

    let category = json!({
        "_id": format!("c{}", data.categories.len() + 1),
        "name": body["name"],
        "description": body["description"]
    });
    data.categories.push(category.clone());
    reply(StatusCode::CREATED, category)
}

async fn register(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
    let mut data = backend.data();
    if data.users.iter().any(|u| u["email"] == body["email"]) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "message": "Email already registered" }),
        );
    }

    let id = format!("u{}", data.users.len() + 1);
    data.users.push(json!({
        "_id": id,
        "name": body["name"],
        "email": body["email"],
        "dailyReadCount": 0
    }));
    reply(
        StatusCode::CREATED,
        json!({ "message": "User registered successfully", "userId": id }),
    )
}

async fn login(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
    let user_id = backend
        .data()
        .users
        .iter()
        .find(|u| u["email"] == body["email"])
        .map(|u| u["_id"].clone());
    match user_id {
        Some(user_id) => reply(StatusCode::OK, json!({ "token": TOKEN, "userId": user_id })),
        None => reply(StatusCode::UNAUTHORIZED, json!({})),
    }
}

async fn get_user(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let user = backend
        .data()
        .users
        .iter()
        .find(|u| u["_id"] == id.as_str())
        .cloned();
    match user {
        Some(user) => reply(StatusCode::OK, user),
        None => reply(StatusCode::NOT_FOUND, json!({ "message": "User not found" })),
    }
}

async fn list_favorites(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let data = backend.data();
    let ids = data.favorites.get(&id).cloned().unwrap_or_default();
    let topics: Vec<Value> = data
        .topics
        .iter()
        .filter(|t| ids.iter().any(|id| t["_id"] == id.as_str()))
        .cloned()
        .collect();
    reply(StatusCode::OK, Value::Array(topics))
}

async fn add_favorite(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let Some(topic_id) = body["topicId"].as_str().map(String::from) else {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "message": "topicId is required" }),
        );
    };

    let mut data = backend.data();
    let favorites = data.favorites.entry(id).or_default();
    if favorites.contains(&topic_id) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "message": "Topic already in favorites" }),
        );
    }
    favorites.push(topic_id.clone());

    let count = adjust_favorite_count(&mut data.topics, &topic_id, true);
    reply(
        StatusCode::OK,
        json!({ "message": "Topic added to favorites", "favoriteCount": count }),
    )
}

async fn remove_favorite(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path((id, topic_id)): Path<(String, String)>,
) -> Response {
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    let mut data = backend.data();
    let favorites = data.favorites.entry(id).or_default();
    let Some(position) = favorites.iter().position(|t| *t == topic_id) else {
        return reply(
            StatusCode::NOT_FOUND,
            json!({ "message": "Topic not in favorites" }),
        );
    };
    favorites.remove(position);

    let count = adjust_favorite_count(&mut data.topics, &topic_id, false);
    reply(
        StatusCode::OK,
        json!({ "message": "Topic removed from favorites", "favoriteCount": count }),
    )
}

fn adjust_favorite_count(topics: &mut [Value], topic_id: &str, increment: bool) -> u64 {
    let Some(topic) = topics.iter_mut().find(|t| t["_id"] == topic_id) else {
        return 0;
    };
    let count = topic["favoriteCount"].as_u64().unwrap_or(0);
    let count = if increment {
        count + 1
    } else {
        count.saturating_sub(1)
    };
    topic["favoriteCount"] = json!(count);
    count
}
