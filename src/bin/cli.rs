//! Masthead CLI
//!
//! Editorial workflow entry point: import editor exports, review and
//! publish articles, curate the front page, and rebuild the search
//! index.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use masthead::{
    config::Config,
    error::{AppError, Result},
    search,
    services::{DocumentImporter, FrontPageCurator, StaticTokenProvider},
    storage::{ArticleStore, LocalStore},
    transform,
};

/// Environment variable holding the editor-side access token.
const TOKEN_ENV: &str = "MASTHEAD_ACCESS_TOKEN";

/// masthead - Editorial Content Core
#[derive(Parser, Debug)]
#[command(
    name = "masthead",
    version,
    about = "Digital newspaper editorial content core"
)]
struct Cli {
    /// Path to the store directory containing config and data files
    #[arg(short, long, default_value = "store")]
    store_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import an editor HTML export as a new draft article
    Import {
        /// URL of the exported document
        url: String,

        /// Article headline
        #[arg(long)]
        title: String,

        /// Contributor byline
        #[arg(long, default_value = "Staff")]
        byline: String,

        /// Article id (defaults to a slug of the title)
        #[arg(long)]
        id: Option<String>,
    },

    /// Validate an article body JSON file against the schema
    Validate {
        /// Path to the candidate JSON file
        file: PathBuf,
    },

    /// Render a stored article body to HTML
    Render {
        /// Article id
        id: String,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Submit a draft article for review
    Submit { id: String },

    /// Publish a reviewed article
    Publish { id: String },

    /// Send a submitted article back to draft
    Reject { id: String },

    /// Curate the front page
    #[command(subcommand)]
    Frontpage(FrontpageCommand),

    /// Rebuild the search index over published articles
    Reindex,

    /// Query the search index
    Search { query: String },

    /// Show store summary
    Info,
}

#[derive(Subcommand, Debug)]
enum FrontpageCommand {
    /// Move an article one slot up
    MoveUp { id: String },

    /// Move an article one slot down
    MoveDown { id: String },

    /// Remove an article from the front page
    Remove { id: String },

    /// Insert an article at the first slot
    Insert { id: String },

    /// Mark an article as the featured article
    Feature { id: String },

    /// Show the front page in display order
    Show,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.store_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    config.validate()?;

    let store = Arc::new(LocalStore::new(&cli.store_dir));

    match cli.command {
        Command::Import {
            url,
            title,
            byline,
            id,
        } => {
            let mut importer = DocumentImporter::new(&config.importer)?;
            if let Ok(token) = std::env::var(TOKEN_ENV) {
                importer =
                    importer.with_token_provider(Arc::new(StaticTokenProvider::new(token)));
            } else {
                log::debug!("{TOKEN_ENV} not set, fetching without credentials");
            }

            let (_, outcome) = importer
                .import(store.as_ref(), &url, &title, &byline, id)
                .await?;

            log::info!(
                "Imported '{}': {} paragraphs, {} media registered, {} media failed",
                outcome.article_id,
                outcome.paragraph_count,
                outcome.media_registered,
                outcome.media_failed
            );
        }

        Command::Validate { file } => {
            let content = std::fs::read_to_string(&file)?;
            let candidate: serde_json::Value = serde_json::from_str(&content)?;
            match transform::validate(&candidate) {
                Some(body) => {
                    log::info!(
                        "Valid article body: {} paragraphs",
                        body.paragraphs.len()
                    );
                }
                None => {
                    log::error!("Invalid article body: {}", file.display());
                    return Err(AppError::validation("Article body failed validation"));
                }
            }
        }

        Command::Render { id, out } => {
            let article = store
                .load_article(&id)
                .await?
                .ok_or_else(|| AppError::validation(format!("No article with id '{id}'")))?;
            let media = store.media_by_id().await?;
            let html = transform::render(&article.body, &media);

            match out {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    log::info!("Rendered '{}' to {}", id, path.display());
                }
                None => println!("{html}"),
            }
        }

        Command::Submit { id } => {
            workflow(store.as_ref(), &id, |a| a.submit()).await?;
            log::info!("Article '{id}' submitted for review");
        }

        Command::Publish { id } => {
            workflow(store.as_ref(), &id, |a| a.publish()).await?;
            log::info!("Article '{id}' published");
        }

        Command::Reject { id } => {
            workflow(store.as_ref(), &id, |a| a.reject()).await?;
            log::info!("Article '{id}' sent back to draft");
        }

        Command::Frontpage(command) => {
            let curator = FrontPageCurator::new(Arc::clone(&store) as Arc<dyn ArticleStore>);
            match command {
                FrontpageCommand::MoveUp { id } => report_move(curator.move_up(&id).await?, &id),
                FrontpageCommand::MoveDown { id } => {
                    report_move(curator.move_down(&id).await?, &id)
                }
                FrontpageCommand::Remove { id } => report_move(curator.remove(&id).await?, &id),
                FrontpageCommand::Insert { id } => {
                    report_move(curator.insert_at_front(&id).await?, &id)
                }
                FrontpageCommand::Feature { id } => {
                    curator.feature(&id).await?;
                    log::info!("Article '{id}' is now featured");
                }
                FrontpageCommand::Show => {
                    let page = curator.front_page().await?;
                    if page.is_empty() {
                        log::info!("Front page is empty");
                    }
                    for article in page {
                        let slot = if article.featured {
                            "featured".to_string()
                        } else {
                            article
                                .front_page_index
                                .map(|i| format!("#{i}"))
                                .unwrap_or_default()
                        };
                        println!("{:>10}  {}  {}", slot, article.id, article.title);
                    }
                }
            }
        }

        Command::Reindex => {
            let published = store.list_published().await?;
            let mut builder = search::IndexBuilder::with_config(config.search.clone());
            builder.add_articles(&published);
            let index = builder.build();
            store.save_search_index(&index).await?;
            log::info!(
                "Indexed {} articles ({} tokens)",
                index.article_count,
                index.token_count
            );
        }

        Command::Search { query } => {
            let index = store.load_search_index().await?.ok_or_else(|| {
                AppError::config("No search index found. Run 'reindex' first.")
            })?;
            let ids = index.lookup(&query);
            if ids.is_empty() {
                log::info!("No matches for '{query}'");
            }
            for id in ids {
                match store.load_article(&id).await? {
                    Some(article) => println!("{}  {}", article.id, article.title),
                    None => println!("{id}"),
                }
            }
        }

        Command::Info => {
            let articles = store.list_articles().await?;
            let published = articles.iter().filter(|a| a.is_published()).count();
            let on_front_page = articles
                .iter()
                .filter(|a| a.front_page_index.is_some())
                .count();
            let media = store.load_media().await?;

            log::info!("Store directory: {}", cli.store_dir.display());
            log::info!("Articles: {} ({} published)", articles.len(), published);
            log::info!("Front page slots: {on_front_page}");
            log::info!("Registered media: {}", media.len());
            log::info!(
                "Search index: {}",
                if store.load_search_index().await?.is_some() {
                    "exists"
                } else {
                    "not built"
                }
            );
        }
    }

    Ok(())
}

/// Load an article, apply a workflow transition, save it back.
async fn workflow(
    store: &dyn ArticleStore,
    id: &str,
    transition: impl FnOnce(&mut masthead::models::Article) -> Result<()>,
) -> Result<()> {
    let mut article = store
        .load_article(id)
        .await?
        .ok_or_else(|| AppError::validation(format!("No article with id '{id}'")))?;
    transition(&mut article)?;
    store.save_article(&article).await
}

fn report_move(changed: bool, id: &str) {
    if changed {
        log::info!("Front page updated for '{id}'");
    } else {
        log::warn!("No change for '{id}'");
    }
}
