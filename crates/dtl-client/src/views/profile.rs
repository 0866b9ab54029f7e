//! The profile page: the logged-in user and their favorite topics.

use dtl_model::{ActionResponse, Topic, TopicId, User};
use tracing::error;

use crate::{
    error::{ClientError, ClientResult},
    views::session::Session,
};

/// Shown when the profile cannot be loaded
pub const PROFILE_FAILED: &str = "An error occurred while fetching your profile.";

/// A loaded profile page
#[derive(Debug, Clone)]
pub struct Profile {
    /// The logged-in user
    pub user: User,
    /// Topics the user favorited
    pub favorites: Vec<Topic>,
}

impl Profile {
    /// Fetch the stored user, then their favorites
    pub async fn load(session: &Session) -> ClientResult<Self> {
        Self::fetch(session).await.map_err(|e| {
            error!(error = %e, "Failed to fetch user profile");
            ClientError::view(PROFILE_FAILED, e)
        })
    }

    async fn fetch(session: &Session) -> ClientResult<Self> {
        let user_id = session.current_user_id()?;
        let client = session.client();

        let user = client.get_user(&user_id).await?;
        let favorites = client.get_favorite_topics(&user_id).await?;

        Ok(Self { user, favorites })
    }

    /// Topics the user created
    pub async fn own_topics(session: &Session) -> ClientResult<Vec<Topic>> {
        session.client().get_user_topics().await
    }

    /// Unfavorite a topic and drop it from the loaded list
    pub async fn remove_favorite(
        &mut self,
        session: &Session,
        topic_id: &TopicId,
    ) -> ClientResult<ActionResponse> {
        let response = session
            .client()
            .remove_favorite_topic(&self.user.id, topic_id)
            .await?;
        self.favorites.retain(|topic| &topic.id != topic_id);
        Ok(response)
    }
}
