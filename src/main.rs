//! CLI entry point for blogshelf

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogshelf::blog::{Action, Selection, SortKey};
use blogshelf::Blogshelf;

#[derive(Parser)]
#[command(name = "blogshelf")]
#[command(version = "0.1.0")]
#[command(about = "Post catalog, facets and filtering for multilingual docs blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts matching a search and facet selection
    #[command(alias = "ls")]
    List {
        /// Language to list (defaults to the configured one)
        #[arg(short, long)]
        lang: Option<String>,

        /// Case-insensitive text search over title, description, tags and author
        #[arg(short, long, default_value = "")]
        query: String,

        /// Category to include (repeatable)
        #[arg(long)]
        category: Vec<String>,

        /// Difficulty to include (repeatable)
        #[arg(long)]
        difficulty: Vec<String>,

        /// Tag to include (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Sort order: newest, oldest, a-z, z-a
        #[arg(short, long, default_value = "newest")]
        sort: String,

        /// Read page descriptors from a JSON dump
        #[arg(long)]
        pages: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the category, difficulty and tag values available
    Facets {
        /// Language to inspect (defaults to the configured one)
        #[arg(short, long)]
        lang: Option<String>,

        /// Read page descriptors from a JSON dump
        #[arg(long)]
        pages: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Serve the catalog as a JSON API
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured one)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured one)
        #[arg(short, long)]
        ip: Option<String>,

        /// Reload content when files change
        #[arg(short, long)]
        watch: bool,

        /// Read page descriptors from a JSON dump
        #[arg(long)]
        pages: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogshelf=debug,info"
    } else {
        "blogshelf=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List {
            lang,
            query,
            category,
            difficulty,
            tag,
            sort,
            pages,
            json,
        } => {
            let shelf = Blogshelf::new(&base_dir)?.with_pages_file(pages);
            let lang = shelf.resolve_lang(lang.as_deref())?;
            let sort: SortKey = sort.parse()?;

            let mut actions = vec![Action::SetQuery(query), Action::SetSort(sort)];
            actions.extend(unique(category).into_iter().map(Action::ToggleCategory));
            actions.extend(unique(difficulty).into_iter().map(Action::ToggleDifficulty));
            actions.extend(unique(tag).into_iter().map(Action::ToggleTag));

            let selection = actions
                .into_iter()
                .fold(Selection::default(), |s, action| s.reduce(action));

            blogshelf::commands::list::run(&shelf, &lang, &selection, json)?;
        }

        Commands::Facets { lang, pages, json } => {
            let shelf = Blogshelf::new(&base_dir)?.with_pages_file(pages);
            let lang = shelf.resolve_lang(lang.as_deref())?;
            blogshelf::commands::facets::run(&shelf, &lang, json)?;
        }

        Commands::Serve {
            port,
            ip,
            watch,
            pages,
        } => {
            let shelf = Blogshelf::new(&base_dir)?.with_pages_file(pages);
            let ip = ip.unwrap_or_else(|| shelf.config.server.ip.clone());
            let port = port.unwrap_or(shelf.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blogshelf::server::start(&shelf, &ip, port, watch).await?;
        }

        Commands::Version => {
            println!("blogshelf version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Drop repeated values so toggling them doesn't cancel out
fn unique(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
