//! Category commands.

use clap::Subcommand;
use soundstore_client::resources::{CategoriesClient, CategoryQuery, NewCategory, UpdateCategory};
use soundstore_client::{ApiClient, PagedAccessor};

use crate::commands::{ListArgs, command_error, print_json, print_page_footer};

#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// List categories, one page at a time.
    List(ListArgs),
    /// Show one category with its sub-categories.
    Get { id: i64 },
    /// Create a category.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a category.
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a category.
    Delete { id: i64 },
}

pub async fn run(client: ApiClient, command: CategoryCommands, json: bool) -> anyhow::Result<()> {
    let categories = CategoriesClient::new(client.clone());

    match command {
        CategoryCommands::List(args) => list(client, args, json).await,
        CategoryCommands::Get { id } => {
            let category = categories.get(id).await.map_err(command_error)?;

            if json {
                return print_json(&category);
            }

            println!("{} (#{})", category.name, category.id);
            if !category.description.is_empty() {
                println!("{}", category.description);
            }
            println!("created: {}", category.created_at);
            if let Some(updated_at) = category.updated_at {
                println!("updated: {updated_at}");
            }
            for sub in &category.sub_categories {
                println!("  - {} (#{})", sub.name, sub.id);
            }
            Ok(())
        }
        CategoryCommands::Create { name, description } => {
            let message = categories
                .create(&NewCategory::new(name, description))
                .await
                .map_err(command_error)?;
            println!("{message}");
            Ok(())
        }
        CategoryCommands::Update {
            id,
            name,
            description,
        } => {
            let message = categories
                .update(id, &UpdateCategory { name, description })
                .await
                .map_err(command_error)?;
            println!("{message}");
            Ok(())
        }
        CategoryCommands::Delete { id } => {
            let message = categories.delete(id).await.map_err(command_error)?;
            println!("{message}");
            Ok(())
        }
    }
}

async fn list(client: ApiClient, args: ListArgs, json: bool) -> anyhow::Result<()> {
    let mut accessor = PagedAccessor::new(client, CategoryQuery);
    accessor
        .fetch_page(args.page, args.page_size)
        .await
        .map_err(command_error)?;

    if let Some(error) = accessor.error() {
        anyhow::bail!("{error}");
    }

    if json {
        return print_json(&accessor.items());
    }

    println!("{:<8} {:<32} {:<8} {}", "ID", "NAME", "SUBS", "CREATED");
    for category in accessor.items() {
        println!(
            "{:<8} {:<32} {:<8} {}",
            category.id,
            category.name,
            category.sub_categories.len(),
            category.created_at
        );
    }
    print_page_footer(accessor.page_info());

    Ok(())
}
