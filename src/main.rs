//! MovieShelf - personal movie collection catalog
//!
//! Command-line front end over the catalog API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use movieshelf::barcode::{is_barcode, BarcodeResolver, TitleResolver};
use movieshelf::catalog::{open_backend, Movie, Support};
use movieshelf::config::{config_path, Config};
use movieshelf::core::FuzzyMatcher;
use movieshelf::search::SearchService;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the catalog by title or barcode
    Search { query: String },

    /// List the catalog, optionally one support and a title filter
    List {
        #[arg(short, long)]
        support: Option<Support>,
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Add a movie
    Add {
        title: String,
        #[arg(short, long)]
        support: Support,
    },

    /// Rename a movie
    Edit {
        old_title: String,
        new_title: String,
        #[arg(short, long)]
        support: Support,
    },

    /// Delete a movie
    Delete {
        title: String,
        #[arg(short, long)]
        support: Support,
    },

    /// Resolve a barcode to a product title
    Lookup { barcode: String },

    /// Check whether a catalog title matches a query
    Match { title: String, query: String },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set the catalog API URL (`demo` for the built-in sample catalog)
    SetUrl { url: String },
}

/// `--verbose` wins, then `RUST_LOG`, then INFO until the config is read
fn initial_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn print_movies(movies: &[Movie]) {
    for movie in movies {
        println!("{:<12} {}", movie.support.as_str(), movie.title);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging before anything can warn
    let (filter, filter_handle) = reload::Layer::new(initial_filter(args.verbose));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load()?;

    if !args.verbose && std::env::var_os("RUST_LOG").is_none() {
        match EnvFilter::try_new(&config.log_level) {
            Ok(level) => {
                if let Err(e) = filter_handle.reload(level) {
                    warn!("Could not apply log level: {}", e);
                }
            }
            Err(e) => warn!("Invalid log_level '{}': {}", config.log_level, e),
        }
    }

    info!("🎬 MovieShelf v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", config_path().display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::SetUrl { url } => {
                config.set_api_url(&url);
                config.save()?;
                println!("Configuration saved");
            }
        },

        Command::Match { title, query } => {
            let matcher = FuzzyMatcher::new(&config.matching);
            let contained = matcher.contains_either_way(&title, &query);
            let overlap = matcher.token_overlap(&title, &query);
            println!("containment:   {}", contained);
            match overlap {
                Some(ratio) => println!(
                    "token overlap: {:.2} (threshold {:.2})",
                    ratio,
                    matcher.threshold()
                ),
                None => println!("token overlap: n/a"),
            }
            println!("match:         {}", matcher.is_match(&title, &query));
        }

        Command::Lookup { barcode } => {
            if !is_barcode(&barcode) {
                anyhow::bail!("'{}' is not an 8 to 14 digit barcode", barcode);
            }
            match BarcodeResolver::from_config(&config)
                .resolve_title(&barcode)
                .await
            {
                Some(title) => println!("{}", title),
                None => println!("No product found for {}", barcode.trim()),
            }
        }

        Command::Search { query } => {
            let service = SearchService::new(
                open_backend(&config)?,
                FuzzyMatcher::new(&config.matching),
            )
            .with_resolver(Arc::new(BarcodeResolver::from_config(&config)));

            let outcome = service.search(&query).await?;
            if let Some(code) = &outcome.barcode {
                println!("Barcode {} → {}", code, outcome.term);
            }
            if outcome.movies.is_empty() {
                println!("No results for '{}'", outcome.term);
            } else {
                if outcome.fuzzy_fallback {
                    println!("No exact match, closest titles:");
                }
                print_movies(&outcome.movies);
            }
        }

        Command::List { support, filter } => {
            let service = SearchService::new(
                open_backend(&config)?,
                FuzzyMatcher::new(&config.matching),
            );
            let movies = service.library(support, filter.as_deref()).await?;
            if movies.is_empty() {
                println!("Nothing here");
            }
            print_movies(&movies);
        }

        Command::Add { title, support } => {
            let backend = open_backend(&config)?;
            let message = backend.add(&title, support).await?;
            println!("{}", message.unwrap_or_else(|| format!("Added '{}'", title)));
        }

        Command::Edit {
            old_title,
            new_title,
            support,
        } => {
            let backend = open_backend(&config)?;
            let message = backend.edit(&old_title, &new_title, support).await?;
            println!(
                "{}",
                message.unwrap_or_else(|| format!("Renamed '{}' to '{}'", old_title, new_title))
            );
        }

        Command::Delete { title, support } => {
            let backend = open_backend(&config)?;
            let message = backend.delete(&title, support).await?;
            println!("{}", message.unwrap_or_else(|| format!("Deleted '{}'", title)));
        }
    }

    Ok(())
}
