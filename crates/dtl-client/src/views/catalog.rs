//! Category listing, per-category topic lists and topic detail.

use dtl_model::{Category, NewCategory, NewTopic, Topic, TopicId, filter_by_category};
use tracing::error;

use crate::{
    client::ApiClient,
    error::{ClientError, ClientResult},
};

/// Shown when the category list cannot be loaded
pub const CATEGORIES_FAILED: &str = "Failed to fetch categories. Please try again.";

/// Categories and the topics filed under them
#[derive(Debug, Clone)]
pub struct Catalog {
    client: ApiClient,
}

impl Catalog {
    /// Catalog backed by `client`
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// All categories
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.client.get_categories().await.map_err(|e| {
            error!(error = %e, "Failed to fetch categories");
            ClientError::view(CATEGORIES_FAILED, e)
        })
    }

    /// Topics whose category name matches `category`, ignoring case
    pub async fn topics_in_category(&self, category: &str) -> ClientResult<Vec<Topic>> {
        if category.trim().is_empty() {
            return Err(ClientError::MissingIdentifier("Category"));
        }

        let topics = self.client.get_topics().await?;
        Ok(filter_by_category(topics, category))
    }

    /// One topic, for the detail page
    pub async fn topic(&self, id: &TopicId) -> ClientResult<Topic> {
        self.client.get_topic(id).await
    }

    /// Create a category; surrounding whitespace is trimmed
    pub async fn create_category(
        &self,
        name: &str,
        description: &str,
    ) -> ClientResult<Category> {
        self.client
            .create_category(&NewCategory {
                name: name.trim().to_string(),
                description: description.trim().to_string(),
            })
            .await
    }

    /// Create a topic in an existing category
    pub async fn create_topic(&self, topic: NewTopic) -> ClientResult<Topic> {
        self.client.create_topic(&topic).await
    }
}
