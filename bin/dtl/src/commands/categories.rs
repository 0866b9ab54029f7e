use clap::Subcommand;
use dtl_client::{Catalog, Session};

use crate::render;

#[derive(Debug, Subcommand)]
pub(crate) enum CategoryCommands {
    /// List all categories
    List,
    /// Create a category
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

pub(crate) async fn handle(session: &Session, cmd: CategoryCommands) -> anyhow::Result<()> {
    let catalog = Catalog::new(session.client().clone());

    match cmd {
        CategoryCommands::List => {
            let categories = catalog.categories().await?;
            render::category_list(&categories);
        }
        CategoryCommands::Create { name, description } => {
            let category = catalog.create_category(&name, &description).await?;
            println!("Created category {} ({})", category.name, category.id);
        }
    }

    Ok(())
}
