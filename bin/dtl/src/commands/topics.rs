use clap::Subcommand;
use dtl_client::{Catalog, Profile, Session, views::feed::MARKED_READ};
use dtl_model::{CategoryId, NewTopic, TopicId};

use crate::render;

#[derive(Debug, Subcommand)]
pub(crate) enum TopicCommands {
    /// List all topics
    List {
        /// Only topics in this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one topic
    Show {
        #[arg(value_name = "ID")]
        topic_id: String,
    },
    /// Topics you created
    Mine,
    /// Create a topic
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category_id: String,
    },
    /// Mark a topic as read
    Read {
        #[arg(value_name = "ID")]
        topic_id: String,
    },
}

pub(crate) async fn handle(session: &Session, cmd: TopicCommands) -> anyhow::Result<()> {
    let catalog = Catalog::new(session.client().clone());

    match cmd {
        TopicCommands::List { category: None } => {
            let topics = session.client().get_topics().await?;
            render::topic_list(&topics, "No topics found.");
        }
        TopicCommands::List {
            category: Some(category),
        } => {
            let topics = catalog.topics_in_category(&category).await?;
            println!("Topics in {category}");
            render::topic_list(&topics, "No topics found in this category.");
        }
        TopicCommands::Show { topic_id } => {
            let topic = catalog.topic(&TopicId::from(topic_id)).await?;
            render::topic_card(&topic, None, false);
        }
        TopicCommands::Mine => {
            let topics = Profile::own_topics(session).await?;
            render::topic_list(&topics, "You haven't created any topics yet.");
        }
        TopicCommands::Create {
            title,
            content,
            category_id,
        } => {
            let topic = catalog
                .create_topic(NewTopic {
                    title,
                    content,
                    category_id: CategoryId::from(category_id),
                })
                .await?;
            println!("Created topic {}", topic.id);
        }
        TopicCommands::Read { topic_id } => {
            let response = session
                .client()
                .mark_topic_as_read(&TopicId::from(topic_id))
                .await?;
            println!(
                "{}",
                response.message.as_deref().unwrap_or(MARKED_READ)
            );
        }
    }

    Ok(())
}

pub(crate) async fn daily(session: &Session) -> anyhow::Result<()> {
    let topic = session.client().get_daily_topic().await?;
    render::topic_card(&topic, None, false);
    Ok(())
}
