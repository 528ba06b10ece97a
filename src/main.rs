//! # Docent CLI Application
//!
//! Command-line interface for the orchestra chatbot, providing access to its
//! pipeline through a set of subcommands.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Subcommands for the chatbot workflow:
//!   - `serve`: Run the web chat interface and JSON API
//!   - `crawl`: Scrape the website and save the pages as text files
//!   - `ask`: Answer one question from documents saved on disk
//!
//! ## Features
//!
//! - Configurable crawling with page limit and rate controls
//! - Environment variable overrides for server settings
//! - Offline question answering against previously saved documents

use clap::{Args, Parser, Subcommand};
use docent::corpus::Corpus;
use docent::prelude::Result;
use docent::processor::{Origin, ProcessorConfig, process};
use docent::scraper::{ScraperConfig, crawl_site, storage};
use docent::server::{self, ServerConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::instrument;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "A chatbot answering questions from uploaded files and website content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web chat interface
    Serve(ServeArgs),

    /// Crawl the website and save its pages as text files
    Crawl(CrawlArgs),

    /// Answer one question from documents saved on disk
    Ask(AskArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, env = "DOCENT_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Root URL of the site the scrape endpoint crawls
    #[arg(short, long, env = "DOCENT_SITE", default_value = "https://www.bridgelandorchestra.com")]
    site: String,

    /// Directory where uploads and scraped pages are saved
    #[arg(long, env = "DOCENT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Root URL of the site to crawl
    #[arg(required = true)]
    site: String,

    /// Maximum number of pages to fetch
    #[arg(short = 'p', long, default_value = "20")]
    max_pages: usize,

    /// Politeness delay in milliseconds between requests
    #[arg(short, long, default_value = "1000")]
    delay: u64,

    /// Directory to save the pages in
    #[arg(short, long, default_value = "data/web")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct AskArgs {
    /// The question to answer
    #[arg(required = true)]
    question: String,

    /// Directory holding saved uploads and scraped pages
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Some(Commands::Serve(args)) => {
            serve_command(args).await?;
        }
        Some(Commands::Crawl(args)) => {
            crawl_command(args).await?;
        }
        Some(Commands::Ask(args)) => {
            ask_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["docent", "--help"]);
        }
    }

    Ok(())
}

#[instrument(skip(args))]
async fn serve_command(args: ServeArgs) -> anyhow::Result<()> {
    println!("Serving the chat interface on http://{}", args.bind);

    server::serve(ServerConfig {
        bind: args.bind,
        site_url: args.site,
        data_dir: args.data_dir,
    })
    .await?;

    Ok(())
}

#[instrument(skip(args))]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    println!("Crawling {}...", args.site);

    let config = ScraperConfig::builder()
        .base_url(args.site)
        .max_pages(args.max_pages)
        .delay_ms(args.delay)
        .build();
    let pages = crawl_site(&config).await?;
    println!("Scraped {} pages", pages.len());

    let saved = storage::save_pages(&pages, &args.output).await?;
    println!("Saved {} files to {}", saved.len(), args.output.display());

    Ok(())
}

#[instrument(skip(args))]
async fn ask_command(args: AskArgs) -> anyhow::Result<()> {
    let mut corpus = Corpus::new();
    let config = ProcessorConfig::default();

    load_dir(&mut corpus, &args.data_dir.join("uploads"), &config).await?;
    load_dir(&mut corpus, &args.data_dir.join("web"), &config).await?;

    if corpus.is_empty() {
        println!(
            "No documents found under {}; run `docent crawl` or upload files first.",
            args.data_dir.display()
        );
    }

    let answer = corpus.answer(&args.question);
    println!("{}", answer.text);

    Ok(())
}

/// Ingest every saved text file in a directory into the corpus
///
/// Scraped pages carry `URL:` and `Title:` header lines; the headers identify
/// the origin and are stripped before ingestion. Anything else is treated as
/// an upload named after the file.
async fn load_dir(corpus: &mut Corpus, dir: &Path, config: &ProcessorConfig) -> Result<()> {
    for (name, contents) in storage::load_saved(dir).await? {
        let (url, body) = storage::split_header(&contents);
        let origin = match url {
            Some(url) => Origin::web(url),
            None => Origin::upload(&name),
        };
        corpus.add_document(process(body, origin, config));
    }
    Ok(())
}
