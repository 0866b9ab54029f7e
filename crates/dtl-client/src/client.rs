//! # Daily Topics API client
//!
//! Stateless pass-through from typed method calls to HTTP requests against
//! the backend. Every request carries the bearer token currently held in the
//! [`TokenStore`]; a missing token is sent as an empty credential and left
//! for the backend to reject. One attempt per call: no retries, no timeouts.

use std::{sync::Arc, time::Instant};

use dtl_model::{
    ActionResponse, Category, FavoriteRequest, LoginCredentials, LoginResponse, NewCategory,
    NewTopic, RegisterUser, Topic, TopicId, User, UserId,
};
use metrics::{counter, histogram};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{Instrument, debug, warn};
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ClientError, ClientResult},
    operation::Operation,
    storage::{TOKEN_KEY, TokenStore},
};

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// HTTP client for the Daily Topics backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client for the configured base URL
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> ClientResult<Self> {
        Self::with_base_url(&config.api_base_url, store)
    }

    /// Create a client for an explicit base URL, e.g. `http://localhost:5001/api`
    pub fn with_base_url(base_url: &str, store: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("Invalid base URL '{base_url}': {e}")))?;

        if url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "Base URL '{base_url}' cannot carry a path"
            )));
        }

        // Joined paths are appended, so the base must end in a slash
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let http = Client::builder()
            .user_agent(format!("dtl-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {e}")))?;

        debug!(base_url = %url, "Created ApiClient");

        Ok(Self {
            http,
            base_url: url,
            store,
        })
    }

    /// Base URL every endpoint path is appended to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Storage the bearer token is read from
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    // ---------------------------------------------------------------------
    // Topics
    // ---------------------------------------------------------------------

    /// `GET /topics`
    pub async fn get_topics(&self) -> ClientResult<Vec<Topic>> {
        self.call(Operation::GetTopics, Method::GET, &["topics"])
            .await
    }

    /// `GET /topics/{id}`
    pub async fn get_topic(&self, id: &TopicId) -> ClientResult<Topic> {
        require(id, "Topic ID")?;
        self.call(Operation::GetTopic, Method::GET, &["topics", id.as_str()])
            .await
    }

    /// `GET /topics/daily`
    pub async fn get_daily_topic(&self) -> ClientResult<Topic> {
        self.call(Operation::GetDailyTopic, Method::GET, &["topics", "daily"])
            .await
    }

    /// `GET /topics/user`, topics created by the token's owner
    pub async fn get_user_topics(&self) -> ClientResult<Vec<Topic>> {
        self.call(Operation::GetUserTopics, Method::GET, &["topics", "user"])
            .await
    }

    /// `POST /topics`
    pub async fn create_topic(&self, topic: &NewTopic) -> ClientResult<Topic> {
        topic.validate()?;
        self.call_with_body(Operation::CreateTopic, Method::POST, &["topics"], topic)
            .await
    }

    /// `POST /topics/{id}/read`
    pub async fn mark_topic_as_read(&self, id: &TopicId) -> ClientResult<ActionResponse> {
        require(id, "Topic ID")?;
        let operation = Operation::MarkTopicAsRead;
        let request = self.request(Method::POST, &["topics", id.as_str(), "read"])?;
        let body = self.dispatch(operation, request).await?;
        decode_action(operation, &body)
    }

    // ---------------------------------------------------------------------
    // Categories
    // ---------------------------------------------------------------------

    /// `GET /categories`
    pub async fn get_categories(&self) -> ClientResult<Vec<Category>> {
        self.call(Operation::GetCategories, Method::GET, &["categories"])
            .await
    }

    /// `POST /categories`
    pub async fn create_category(&self, category: &NewCategory) -> ClientResult<Category> {
        category.validate()?;
        self.call_with_body(
            Operation::CreateCategory,
            Method::POST,
            &["categories"],
            category,
        )
        .await
    }

    // ---------------------------------------------------------------------
    // Users and favorites
    // ---------------------------------------------------------------------

    /// `GET /users/{id}`
    pub async fn get_user(&self, id: &UserId) -> ClientResult<User> {
        require(id, "User ID")?;
        self.call(Operation::GetUser, Method::GET, &["users", id.as_str()])
            .await
    }

    /// `POST /users`
    pub async fn register_user(&self, user: &RegisterUser) -> ClientResult<ActionResponse> {
        user.validate()?;
        let operation = Operation::RegisterUser;
        let request = self.request(Method::POST, &["users"])?.json(user);
        let body = self.dispatch(operation, request).await?;
        decode_action(operation, &body)
    }

    /// `POST /users/login`
    pub async fn login_user(&self, credentials: &LoginCredentials) -> ClientResult<LoginResponse> {
        credentials.validate()?;
        self.call_with_body(
            Operation::LoginUser,
            Method::POST,
            &["users", "login"],
            credentials,
        )
        .await
    }

    /// `GET /users/{id}/favorites`
    pub async fn get_favorite_topics(&self, user_id: &UserId) -> ClientResult<Vec<Topic>> {
        require(user_id, "User ID")?;
        self.call(
            Operation::GetFavoriteTopics,
            Method::GET,
            &["users", user_id.as_str(), "favorites"],
        )
        .await
    }

    /// `POST /users/{id}/favorites`
    pub async fn add_favorite_topic(
        &self,
        user_id: &UserId,
        topic_id: &TopicId,
    ) -> ClientResult<ActionResponse> {
        require(user_id, "User ID")?;
        require(topic_id, "Topic ID")?;

        let operation = Operation::AddFavoriteTopic;
        let payload = FavoriteRequest {
            topic_id: topic_id.clone(),
        };
        let request = self
            .request(Method::POST, &["users", user_id.as_str(), "favorites"])?
            .json(&payload);
        let body = self.dispatch(operation, request).await?;
        decode_action(operation, &body)
    }

    /// `DELETE /users/{id}/favorites/{topic_id}`
    pub async fn remove_favorite_topic(
        &self,
        user_id: &UserId,
        topic_id: &TopicId,
    ) -> ClientResult<ActionResponse> {
        require(user_id, "User ID")?;
        require(topic_id, "Topic ID")?;

        let operation = Operation::RemoveFavoriteTopic;
        let request = self.request(
            Method::DELETE,
            &["users", user_id.as_str(), "favorites", topic_id.as_str()],
        )?;
        let body = self.dispatch(operation, request).await?;
        decode_action(operation, &body)
    }

    // ---------------------------------------------------------------------
    // Plumbing
    // ---------------------------------------------------------------------

    async fn call<T>(&self, operation: Operation, method: Method, path: &[&str]) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(method, path)?;
        let body = self.dispatch(operation, request).await?;
        decode(operation, &body)
    }

    async fn call_with_body<T, B>(
        &self,
        operation: Operation,
        method: Method,
        path: &[&str],
        payload: &B,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(method, path)?.json(payload);
        let body = self.dispatch(operation, request).await?;
        decode(operation, &body)
    }

    /// Build the URL for `path` segments, each percent-encoded on its own
    fn endpoint(&self, path: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Config(format!("Invalid base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    /// Start a request with the stored bearer token attached
    fn request(&self, method: Method, path: &[&str]) -> ClientResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        let token = self.store.get(TOKEN_KEY)?.unwrap_or_default();

        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send once and return the body of a successful response
    async fn dispatch(&self, operation: Operation, request: RequestBuilder) -> ClientResult<String> {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!(
            "api_request",
            operation = operation.name(),
            request_id = %request_id,
        );

        async move {
            let started = Instant::now();
            let sent = request
                .header(REQUEST_ID_HEADER, request_id.as_str())
                .send()
                .await;
            histogram!(
                "dtl_client_request_duration_seconds",
                "operation" => operation.name()
            )
            .record(started.elapsed().as_secs_f64());

            let response = match sent {
                Ok(response) => response,
                Err(source) => {
                    record_outcome(operation, "network_error");
                    warn!(error = %source, "Request failed");
                    return Err(ClientError::Network {
                        message: operation.failure_message(),
                        source,
                    });
                }
            };

            let status = response.status();
            let body = response.text().await.map_err(|source| {
                record_outcome(operation, "network_error");
                ClientError::Network {
                    message: operation.failure_message(),
                    source,
                }
            })?;

            if !status.is_success() {
                let message = failure_message(&body, operation.failure_message());
                record_outcome(operation, "rejected");
                warn!(status = status.as_u16(), %message, "Request rejected");
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            record_outcome(operation, "ok");
            debug!(status = status.as_u16(), "Request succeeded");
            Ok(body)
        }
        .instrument(span)
        .await
    }
}

fn record_outcome(operation: Operation, outcome: &'static str) {
    counter!(
        "dtl_client_requests_total",
        "operation" => operation.name(),
        "outcome" => outcome
    )
    .increment(1);
}

fn require(id: &impl AsRef<str>, what: &'static str) -> ClientResult<()> {
    if id.as_ref().trim().is_empty() {
        return Err(ClientError::MissingIdentifier(what));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(operation: Operation, body: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|source| ClientError::Decode {
        message: operation.failure_message(),
        source,
    })
}

/// Mutation endpoints may answer with an empty body
fn decode_action(operation: Operation, body: &str) -> ClientResult<ActionResponse> {
    if body.trim().is_empty() {
        return Ok(ActionResponse::default());
    }
    decode(operation, body)
}

/// Server-supplied `message` (or `error`) field, else `fallback`.
/// Blank or non-string server values count as absent, so the result is
/// never empty.
fn failure_message(body: &str, fallback: &str) -> String {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return fallback.to_string();
    };

    ["message", "error"]
        .into_iter()
        .filter_map(|key| fields.get(key).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
        .map_or_else(|| fallback.to_string(), str::to_string)
}
