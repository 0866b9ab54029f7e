use clap::Subcommand;
use dtl_client::{
    Session,
    views::feed::{FAVORITE_ADDED, FAVORITE_REMOVED},
};
use dtl_model::TopicId;

use crate::render;

#[derive(Debug, Subcommand)]
pub(crate) enum FavoriteCommands {
    /// List your favorite topics
    List,
    /// Add a topic to your favorites
    Add {
        #[arg(value_name = "TOPIC_ID")]
        topic_id: String,
    },
    /// Remove a topic from your favorites
    Remove {
        #[arg(value_name = "TOPIC_ID")]
        topic_id: String,
    },
}

pub(crate) async fn handle(session: &Session, cmd: FavoriteCommands) -> anyhow::Result<()> {
    let user_id = session.current_user_id()?;
    let client = session.client();

    match cmd {
        FavoriteCommands::List => {
            let topics = client.get_favorite_topics(&user_id).await?;
            render::topic_list(&topics, "You haven't favorited any topics yet.");
        }
        FavoriteCommands::Add { topic_id } => {
            let response = client
                .add_favorite_topic(&user_id, &TopicId::from(topic_id))
                .await?;
            println!(
                "{}",
                response.message.as_deref().unwrap_or(FAVORITE_ADDED)
            );
        }
        FavoriteCommands::Remove { topic_id } => {
            let response = client
                .remove_favorite_topic(&user_id, &TopicId::from(topic_id))
                .await?;
            println!(
                "{}",
                response.message.as_deref().unwrap_or(FAVORITE_REMOVED)
            );
        }
    }

    Ok(())
}
