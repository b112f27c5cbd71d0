//! CLI binary for musicdl.
//!
//! Diagnostics go to the configured log file so that stdout stays clean
//! for the rendered results (JSON or table).

mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use musicdl_search::{registry, SearchConfig};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// musicdl: search music across multiple providers, ranked in one list.
#[derive(Parser)]
#[command(name = "musicdl", version, about)]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search the configured sources for a keyword and print ranked results.
    Search {
        /// Search keyword.
        keyword: String,

        /// Log file path.
        #[arg(short = 'l', long, default_value = "musicdl.log")]
        logfile: PathBuf,

        /// JSON-encoded proxy map, e.g. '{"http": "http://127.0.0.1:8080"}'.
        #[arg(short = 'p', long, default_value = "{}")]
        proxies: String,

        /// Save directory.
        #[arg(short = 's', long, default_value = "music")]
        save: PathBuf,

        /// Comma-delimited source list; defaults to the full registry.
        #[arg(short = 't', long)]
        targets: Option<String>,

        /// Per-source result cap.
        #[arg(short = 'c', long, default_value_t = 5)]
        count: usize,

        /// Emit JSON instead of a table.
        #[arg(short = 'j', long)]
        out_json: bool,

        /// Scoring policy for ranking the results.
        #[arg(short = 'a', long, default_value = "default")]
        algorithm: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            keyword,
            logfile,
            proxies,
            save,
            targets,
            count,
            out_json,
            algorithm,
        } => {
            let config = build_config(logfile, &proxies, save, count, algorithm)?;

            // Keep the non-blocking writer's guard alive for the whole run.
            let _guard = init_logging(&config.logfilepath);

            let sources = registry::resolve(targets.as_deref());
            tracing::info!(keyword = %keyword, sources = sources.len(), "starting search");

            let tracks = musicdl_search::search(&keyword, &config, &sources).await?;

            if out_json {
                println!("{}", output::render_json(&tracks)?);
            } else {
                print!("{}", output::render_table(&tracks));
            }
            Ok(())
        }
    }
}

/// Assemble the search configuration from the CLI options.
///
/// Malformed proxy JSON is fatal here, before any search runs.
fn build_config(
    logfile: PathBuf,
    proxies_text: &str,
    save: PathBuf,
    count: usize,
    algorithm: String,
) -> anyhow::Result<SearchConfig> {
    let proxies: HashMap<String, String> =
        serde_json::from_str(proxies_text).context("invalid proxies JSON")?;

    Ok(SearchConfig {
        logfilepath: logfile,
        proxies,
        savedir: save,
        search_size_per_source: count,
        algorithm,
        ..Default::default()
    })
}

/// Initialise tracing with a non-blocking file writer at `logfile`.
///
/// Users can override verbosity with `RUST_LOG`.
fn init_logging(logfile: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let (dir, file_name) = log_destination(logfile);
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("musicdl=info,musicdl_search=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    guard
}

/// Split a logfile path into the directory and file name the appender needs.
fn log_destination(logfile: &Path) -> (PathBuf, OsString) {
    let dir = match logfile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = logfile
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("musicdl.log"));
    (dir, file_name)
}
