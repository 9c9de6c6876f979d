//! serp-archive CLI - search, list result links and archive the pages.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use serp_archive::{
    Archiver, FetcherConfig, HttpFetcher, Markers, Search, SearchQuery, DEFAULT_USER_AGENT, USAGE,
};

/// Search the web, print the result links and download every result page
#[derive(Parser)]
#[command(name = "serp-archive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search terms (put terms starting with '-' after `--`)
    terms: Vec<String>,

    /// Directory the result pages are written to
    #[arg(short, long, default_value = "html")]
    output_dir: PathBuf,

    /// Output format for the link list
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Print the links without downloading the pages
    #[arg(long)]
    no_archive: bool,

    /// Proxy URL (e.g., http://127.0.0.1:8080 or socks5://127.0.0.1:1080)
    #[arg(short, long)]
    proxy: Option<String>,

    /// Override the User-Agent header
    #[arg(long)]
    user_agent: Option<String>,

    /// JSON file with result markers ({"heading", "protocol", "end"})
    #[arg(long)]
    markers: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.terms.is_empty() {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("serp_archive=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_markers(path: &Path) -> Result<Markers> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read markers file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse markers file {}", path.display()))
}

async fn run(cli: Cli) -> Result<()> {
    let query = SearchQuery::new(cli.terms)?;

    let config = FetcherConfig {
        user_agent: cli
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        proxy: cli.proxy,
    };
    let fetcher = Arc::new(HttpFetcher::with_config(&config)?);

    let mut search = Search::new(fetcher.clone());
    if let Some(path) = &cli.markers {
        search = search.with_markers(load_markers(path)?)?;
    }

    let json = cli.format == OutputFormat::Json;
    let report = |line: String| {
        if json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    let url = search.url_for(&query)?;
    report(format!("Downloading [{}]...\n", url));

    let results = search.search(&query).await?;
    match cli.format {
        OutputFormat::Text => {
            for link in results.links() {
                println!("  {}", link);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    if cli.no_archive {
        return Ok(());
    }

    let archiver = Archiver::new(fetcher, &cli.output_dir);
    archiver
        .archive_with(results.links(), |outcome| match outcome {
            Ok(page) => report(format!("Downloaded: {}", page.url)),
            Err(failure) => report(failure.to_string()),
        })
        .await?;

    Ok(())
}
