//! Interactive reader over the topic feed.

use std::io::Write;

use dtl_client::{ReaderFeed, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::render;

pub(crate) async fn run(session: &Session) -> anyhow::Result<()> {
    session.require_login()?;

    let mut feed = ReaderFeed::new();
    feed.refresh(session).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(topic) = feed.current() else {
            println!("No topics available. Check back later!");
            return Ok(());
        };
        render::topic_card(topic, feed.position(), feed.is_favorite());

        print!("[r]ead  [f]avorite  [n]ext  [q]uit > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };

        let result = match line.trim() {
            "r" | "read" => feed.mark_read(session).await,
            "f" | "fav" | "favorite" => feed.toggle_favorite(session).await,
            "" | "n" | "next" => {
                feed.advance(session).await?;
                continue;
            }
            "q" | "quit" => return Ok(()),
            other => {
                println!("Unknown command '{other}'");
                continue;
            }
        };

        if let Err(e) = result {
            debug!(error = %e, "Feed action failed");
        }
        if let Some(message) = feed.message() {
            println!("{message}");
        }
    }
}
