/// Every backend call the client can make.
///
/// Carries the operation's metric/log name and the message reported when the
/// backend rejects the call without explaining why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetTopics,
    GetTopic,
    GetUser,
    AddFavoriteTopic,
    RemoveFavoriteTopic,
    GetFavoriteTopics,
    RegisterUser,
    LoginUser,
    GetDailyTopic,
    MarkTopicAsRead,
    CreateTopic,
    GetUserTopics,
    GetCategories,
    CreateCategory,
}

impl Operation {
    /// `snake_case` name used in logs and metric labels
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetTopics => "get_topics",
            Self::GetTopic => "get_topic",
            Self::GetUser => "get_user",
            Self::AddFavoriteTopic => "add_favorite_topic",
            Self::RemoveFavoriteTopic => "remove_favorite_topic",
            Self::GetFavoriteTopics => "get_favorite_topics",
            Self::RegisterUser => "register_user",
            Self::LoginUser => "login_user",
            Self::GetDailyTopic => "get_daily_topic",
            Self::MarkTopicAsRead => "mark_topic_as_read",
            Self::CreateTopic => "create_topic",
            Self::GetUserTopics => "get_user_topics",
            Self::GetCategories => "get_categories",
            Self::CreateCategory => "create_category",
        }
    }

    /// Message used when the backend gives none
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::GetTopics => "Failed to fetch topics",
            Self::GetTopic => "Failed to fetch topic",
            Self::GetUser => "Failed to fetch user",
            Self::AddFavoriteTopic => "Failed to add favorite topic",
            Self::RemoveFavoriteTopic => "Failed to remove favorite topic",
            Self::GetFavoriteTopics => "Failed to fetch favorite topics",
            Self::RegisterUser => "Failed to register user",
            Self::LoginUser => "Failed to login",
            Self::GetDailyTopic => "Failed to fetch daily topic",
            Self::MarkTopicAsRead => "Failed to mark topic as read",
            Self::CreateTopic => "Failed to create topic",
            Self::GetUserTopics => "Failed to fetch user topics",
            Self::GetCategories => "Failed to fetch categories",
            Self::CreateCategory => "Failed to create category",
        }
    }
}
