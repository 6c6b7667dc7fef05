mod commands;
mod render;
mod shell;
mod utils;

use std::env;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventdesk_core::Id;
use eventdesk_core::config::Settings;
use eventdesk_core::listing::EventFilter;
use eventdesk_core::shell::LISTING_ROUTE;
use eventdesk_core::store::HttpEventStore;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::commands::EventArgs;
use crate::shell::TerminalShell;

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(about = "Browse, add, edit and delete events on an Event Store")]
struct Cli {
    /// Event Store base URL (overrides config.toml and EVENTDESK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events
    List {
        /// Only events whose title contains this (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only events in this category (by id)
        #[arg(short, long)]
        category: Option<String>,

        /// Print the matching events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one event with its creator and categories
    Show {
        id: String,

        /// Show the event listing afterwards
        #[arg(short, long)]
        back: bool,
    },
    /// Edit an event (prompts for every field when no flags are given)
    Edit {
        id: String,

        #[command(flatten)]
        fields: EventArgs,

        /// Remove the event from this category (repeatable)
        #[arg(long = "remove-category")]
        remove_categories: Vec<String>,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Add a new event (prompts when no flags are given)
    Add {
        #[command(flatten)]
        fields: EventArgs,
    },
    /// List categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = match cli.api_url {
        Some(url) => Settings::load()?.with_api_url(url)?,
        None => Settings::load()?,
    };
    debug!(api_url = %settings.api_url, timeout_secs = settings.timeout_secs, "settings loaded");

    let store = Arc::new(HttpEventStore::new(&settings)?);
    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let shell = Arc::new(TerminalShell::new(assume_yes));

    match cli.command {
        Commands::List {
            search,
            category,
            json,
        } => {
            let filter = EventFilter::new(search, category.as_deref());
            commands::list::run(store.as_ref(), &filter, json).await?;
        }
        Commands::Show { id, back } => {
            commands::show::run(store.clone(), shell.clone(), Id::from(id), back).await?;
        }
        Commands::Edit {
            id,
            fields,
            remove_categories,
        } => {
            commands::edit::run(
                store.clone(),
                shell.clone(),
                Id::from(id),
                fields,
                remove_categories,
            )
            .await?;
        }
        Commands::Delete { id, .. } => {
            commands::delete::run(store.clone(), shell.clone(), Id::from(id)).await?;
        }
        Commands::Add { fields } => {
            commands::add::run(store.clone(), shell.clone(), fields).await?;
        }
        Commands::Categories => commands::categories::run(store.as_ref()).await?,
    }

    // The view-models navigate back to the listing after a delete, an add
    // or `show --back`.
    if shell.take_route().as_deref() == Some(LISTING_ROUTE) {
        println!();
        commands::list::run(store.as_ref(), &EventFilter::default(), false).await?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("EVENTDESK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "eventdesk=debug,info"
        } else {
            "eventdesk=info,warn"
        })
    });

    let format = env::var("EVENTDESK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}
