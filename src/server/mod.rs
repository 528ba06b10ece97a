//! # Server Module
//!
//! The HTTP front of the chatbot: a small axum application serving a single
//! chat page and a JSON API over the shared corpus.
//!
//! ## Routes
//!
//! - `GET /` serves the embedded chat page
//! - `POST /api/upload` ingests uploaded text files (multipart)
//! - `POST /api/scrape` crawls the configured site and ingests the pages
//! - `POST /api/ask` answers one question from the current corpus
//! - `GET /api/sources` lists ingested sources with their span counts
//! - `POST /api/reset` replaces the corpus with an empty one
//!
//! State is one corpus behind an `RwLock` shared by all handlers; questions
//! take a read lock while ingestion and reset take the write lock.

mod error;
mod routes;

pub use error::ApiError;

use crate::corpus::Corpus;
use crate::processor::ProcessorConfig;
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: SocketAddr,

    /// Root URL of the site the scrape endpoint crawls
    pub site_url: String,

    /// Directory where uploads and scraped pages are persisted
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Directory where uploaded files are saved
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    /// Directory where scraped pages are saved
    pub fn web_dir(&self) -> PathBuf {
        self.data_dir.join("web")
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// The corpus all handlers read from and write to
    pub corpus: Arc<RwLock<Corpus>>,

    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Processing options applied to every ingested document
    pub processor: ProcessorConfig,
}

impl AppState {
    /// Create fresh state with an empty corpus
    pub fn new(config: ServerConfig) -> Self {
        Self {
            corpus: Arc::new(RwLock::new(Corpus::new())),
            config: Arc::new(config),
            processor: ProcessorConfig::default(),
        }
    }
}

/// Build the application router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/api/upload", post(routes::upload))
        .route("/api/scrape", post(routes::scrape))
        .route("/api/ask", post(routes::ask))
        .route("/api/sources", get(routes::sources))
        .route("/api/reset", post(routes::reset))
        .with_state(state)
}

/// Run the server until it is shut down
pub async fn serve(config: ServerConfig) -> Result<(), crate::Error> {
    let bind = config.bind;
    let state = AppState::new(config);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on http://{}", bind);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
