//! # GitHub Repos Bot CLI (`ghrepos`)
//!
//! Runs the repository search pipeline from the terminal or starts the
//! HTTP front end.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ghrepos search <query>` | Print the direct reply (HTML, ≤ 4096 chars) |
//! | `ghrepos inline <query>` | Print the inline answer as JSON |
//! | `ghrepos parse <query>` | Show how a query is split, without searching |
//! | `ghrepos help-text` | Print the introduction message |
//! | `ghrepos source` | Print the source-code notice |
//! | `ghrepos serve` | Start the HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! ghrepos search anime sort:stars order:desc language:Python
//! ghrepos inline "language:Rust stars:1000..2000 forks:<=100"
//! ghrepos --config ./config/ghrepos.toml serve
//! ```

use anyhow::bail;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use github_repos_bot::config::{self, Config};
use github_repos_bot::github::GitHubClient;
use github_repos_bot::intro::{introduction_text, source_text};
use github_repos_bot::logging::init_logging;
use github_repos_bot::reply::{answer_inline, answer_message};
use github_repos_bot::server;
use github_repos_core::query::{parse_query, SearchQuery, SearchRequest};

/// Search GitHub repositories with free-text queries.
///
/// Queries mix plain words with `key:value` qualifiers, for example
/// `anime sort:stars order:desc language:Python`.
#[derive(Parser)]
#[command(name = "ghrepos", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// If the file does not exist, built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/ghrepos.toml")]
    config: PathBuf,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and print the direct reply.
    Search {
        /// Query words; joined with single spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Search and print the inline answer as JSON.
    Inline {
        /// Query words; joined with single spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Print the parsed query and the request it produces.
    Parse {
        /// Query words; joined with single spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Print the introduction message.
    HelpText {
        /// First name to greet.
        #[arg(long, default_value = "there")]
        name: String,
    },

    /// Print the source-code notice.
    Source,

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[derive(Serialize)]
struct ParseOutput {
    query: SearchQuery,
    request: SearchRequest,
}

fn load_or_default(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        let cfg = config::load_config(path)?;
        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(cfg)
    } else {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        Ok(Config::minimal())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    // Commands that don't require config
    match &cli.command {
        Commands::Parse { query } => {
            let query = parse_query(&query.join(" "));
            let output = ParseOutput {
                request: query.to_request(),
                query,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }
        Commands::HelpText { name } => {
            println!("{}", introduction_text(name));
            return Ok(());
        }
        Commands::Source => {
            println!("{}", source_text());
            return Ok(());
        }
        _ => {}
    }

    let cfg = load_or_default(&cli.config)?;

    match cli.command {
        Commands::Search { query } => {
            let github = GitHubClient::new(&cfg.github);
            let Some(reply) = answer_message(&github, &query.join(" ")).await else {
                bail!("query must not be empty");
            };
            github.close();
            println!("{}", reply.text);
        }
        Commands::Inline { query } => {
            let github = GitHubClient::new(&cfg.github);
            let Some(answer) = answer_inline(&github, &query.join(" ")).await else {
                bail!("query must not be empty");
            };
            github.close();
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Parse { .. } | Commands::HelpText { .. } | Commands::Source => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
