//! Command dispatch and shared output helpers.
//!
//! Protected commands evaluate the session guard before touching the API
//! and refuse with the guard's redirect target when the session is missing,
//! expired, or lacks the admin role. Mutations print the server's outcome
//! message and leave refetching to the user (re-run `list`).

pub mod auth;
pub mod categories;
pub mod customers;
pub mod products;

use clap::Subcommand;
use serde::Serialize;
use soundstore_client::session::{LOGIN_REDIRECT, evaluate};
use soundstore_client::{Error, PageInfo, SessionManager, page_items};

use crate::TRACING_TARGET_COMMAND;
use crate::config::Cli;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and persist a session token.
    Login(auth::LoginArgs),
    /// Clear the persisted session. Local only, no network call.
    Logout,
    /// Show the profile of the logged-in user.
    Whoami,
    /// Manage product categories.
    #[command(subcommand)]
    Category(categories::CategoryCommands),
    /// Manage products.
    #[command(subcommand)]
    Product(products::ProductCommands),
    /// Manage customer accounts.
    #[command(subcommand)]
    Customer(customers::CustomerCommands),
}

/// Runs the parsed command.
pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let client = cli.connection.api_client()?;
    let mut session = SessionManager::new(client.clone());

    match cli.command {
        Commands::Login(args) => auth::login(&mut session, args).await,
        Commands::Logout => auth::logout(&mut session),
        Commands::Whoami => auth::whoami(&mut session, cli.json).await,
        Commands::Category(command) => {
            ensure_admin(&mut session).await?;
            categories::run(client, command, cli.json).await
        }
        Commands::Product(command) => {
            ensure_admin(&mut session).await?;
            products::run(client, command, cli.json).await
        }
        Commands::Customer(command) => {
            ensure_admin(&mut session).await?;
            customers::run(client, command, cli.json).await
        }
    }
}

/// Refreshes the session and evaluates the route guard, refusing the
/// command unless it resolves to an admin session.
async fn ensure_admin(session: &mut SessionManager) -> anyhow::Result<()> {
    if session.stored_token().is_some() {
        // A failed refresh tears the session down; the guard reports it.
        let _ = session.refresh().await;
    }

    let state = evaluate(session);
    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        state = ?state,
        "guard evaluated"
    );

    match state.redirect() {
        None => Ok(()),
        Some(LOGIN_REDIRECT) => anyhow::bail!(
            "no valid session (redirect: {LOGIN_REDIRECT}); run `soundstore login` first"
        ),
        Some(target) => anyhow::bail!("admin role required (redirect: {target})"),
    }
}

/// Prints a value as pretty JSON for `--json` output.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints the pager line under a listed table.
pub(crate) fn print_page_footer(info: &PageInfo) {
    let window = page_items(info.current_page, info.total_pages);
    if window.is_empty() {
        println!("({} items)", info.total_items);
        return;
    }

    let buttons = window
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "page {}/{}  [{buttons}]  ({} items)",
        info.current_page, info.total_pages, info.total_items
    );
}

/// Converts a client error into a displayed command failure, keeping the
/// field-keyed validation details when the server returned them.
pub(crate) fn command_error(err: Error) -> anyhow::Error {
    match err.field_errors() {
        Some(fields) => {
            let details = fields
                .iter()
                .map(|(field, messages)| format!("  {field}: {}", messages.join("; ")))
                .collect::<Vec<_>>()
                .join("\n");
            anyhow::anyhow!("{}\n{details}", err.user_message())
        }
        None => anyhow::anyhow!(err.user_message()),
    }
}

/// Shared paging flags for `list` commands.
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct ListArgs {
    /// Page number to fetch (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Number of items per page.
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,
}
