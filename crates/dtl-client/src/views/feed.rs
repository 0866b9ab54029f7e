//! The home page reader: one topic at a time, with read and favorite actions.

use dtl_model::{Topic, TopicId};
use tracing::{error, warn};

use crate::{
    error::{ClientError, ClientResult},
    views::session::Session,
};

/// Shown when the topic list cannot be loaded
pub const FETCH_FAILED: &str = "An error occurred while fetching topics.";
/// Shown after a topic is marked read
pub const MARKED_READ: &str = "Great job! You've completed this topic.";
/// Shown after a favorite is added
pub const FAVORITE_ADDED: &str = "Topic added to favorites!";
/// Shown after a favorite is removed
pub const FAVORITE_REMOVED: &str = "Topic removed from favorites!";

/// Topic list with a cursor.
///
/// Methods take `&mut self`, so a feed never has two requests in flight.
/// Favorite state and counts are toggled locally after the backend accepts
/// the change and are replaced by server data on the next fetch.
#[derive(Debug, Default)]
pub struct ReaderFeed {
    topics: Vec<Topic>,
    index: usize,
    is_read: bool,
    is_favorite: bool,
    message: Option<String>,
}

impl ReaderFeed {
    /// Empty feed; call [`refresh`](Self::refresh) to load it
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a feed from already fetched topics
    pub fn from_topics(topics: Vec<Topic>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    /// Topic under the cursor
    pub fn current(&self) -> Option<&Topic> {
        self.topics.get(self.index)
    }

    /// 1-based position and total, `None` when the feed is empty
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current().map(|_| (self.index + 1, self.topics.len()))
    }

    /// Whether the current topic was marked read
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// Whether the current topic was favorited from this feed
    pub const fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Message to show the user after the last action
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Fetch the topic list and start over from the first topic
    pub async fn refresh(&mut self, session: &Session) -> ClientResult<()> {
        self.fetch(session).await?;
        self.message = None;
        Ok(())
    }

    /// Mark the current topic read, then move on.
    ///
    /// `Ok` means the backend recorded the read. If moving on needs a refetch
    /// and that fails, the feed stays on the read topic with `is_read` set and
    /// the fetch failure in [`message`](Self::message).
    pub async fn mark_read(&mut self, session: &Session) -> ClientResult<()> {
        let topic_id = self.current_id()?;

        match session.client().mark_topic_as_read(&topic_id).await {
            Ok(_) => {
                self.is_read = true;
                self.message = Some(MARKED_READ.to_string());
                if let Err(e) = self.advance(session).await {
                    warn!(
                        topic_id = %topic_id,
                        error = %e,
                        "Topic marked read but feed did not advance"
                    );
                    self.is_read = true;
                }
                Ok(())
            }
            Err(e) => {
                error!(topic_id = %topic_id, error = %e, "Failed to mark topic as read");
                Err(self.fail(e))
            }
        }
    }

    /// Add the current topic to favorites, or remove it if already added.
    ///
    /// Stays on the current topic, so two toggles in a row leave the feed as
    /// it was.
    pub async fn toggle_favorite(&mut self, session: &Session) -> ClientResult<()> {
        let user_id = session.current_user_id().map_err(|e| self.fail(e))?;
        let topic_id = self.current_id()?;
        let client = session.client();

        let result = if self.is_favorite {
            client
                .remove_favorite_topic(&user_id, &topic_id)
                .await
                .map(|_| FAVORITE_REMOVED)
        } else {
            client
                .add_favorite_topic(&user_id, &topic_id)
                .await
                .map(|_| FAVORITE_ADDED)
        };

        match result {
            Ok(message) => {
                self.is_favorite = !self.is_favorite;
                let favorite = self.is_favorite;
                if let Some(topic) = self.topics.get_mut(self.index) {
                    topic.favorite_count = if favorite {
                        topic.favorite_count.saturating_add(1)
                    } else {
                        topic.favorite_count.saturating_sub(1)
                    };
                }
                self.message = Some(message.to_string());
                Ok(())
            }
            Err(e) => {
                error!(topic_id = %topic_id, error = %e, "Failed to toggle favorite");
                Err(self.fail(e))
            }
        }
    }

    /// Move to the next topic, refetching once the end is reached
    pub async fn advance(&mut self, session: &Session) -> ClientResult<()> {
        self.is_read = false;
        self.is_favorite = false;

        if self.index + 1 < self.topics.len() {
            self.index += 1;
            Ok(())
        } else {
            self.fetch(session).await
        }
    }

    async fn fetch(&mut self, session: &Session) -> ClientResult<()> {
        match session.client().get_topics().await {
            Ok(topics) => {
                self.topics = topics;
                self.index = 0;
                self.is_read = false;
                self.is_favorite = false;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch topics");
                Err(self.fail(ClientError::view(FETCH_FAILED, e)))
            }
        }
    }

    fn current_id(&mut self) -> ClientResult<TopicId> {
        if let Some(topic) = self.current() {
            return Ok(topic.id.clone());
        }
        Err(self.fail(ClientError::MissingIdentifier("Topic")))
    }

    /// Record the error's message for display and hand the error back
    fn fail(&mut self, e: ClientError) -> ClientError {
        self.message = Some(e.user_message());
        e
    }
}
