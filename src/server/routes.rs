//! Request handlers for the chat page and the JSON API

use super::{ApiError, AppState};
use crate::corpus::{Corpus, SourceInfo};
use crate::processor::{Origin, process};
use crate::scraper::{ScraperConfig, crawl_site, storage};
use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::Html;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, instrument};

/// Serve the embedded chat page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Response to a successful upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Names of the files ingested, in upload order
    pub files: Vec<String>,

    /// Total spans added to the corpus
    pub spans: usize,
}

/// Ingest uploaded text files into the corpus
///
/// Each multipart field is treated as one text file: saved under the uploads
/// directory, processed, and appended to the corpus. Non-UTF-8 bytes are
/// replaced rather than rejected.
#[instrument(skip_all)]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let uploads_dir = state.config.uploads_dir();
    fs::create_dir_all(&uploads_dir).await?;

    let mut files = Vec::new();
    let mut spans = 0;
    while let Some(field) = multipart.next_field().await? {
        let name = field
            .file_name()
            .map(storage::sanitize_filename)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("upload-{}.txt", files.len() + 1));
        let bytes = field.bytes().await?;
        fs::write(uploads_dir.join(&name), &bytes).await?;

        let text = String::from_utf8_lossy(&bytes);
        let doc = process(&text, Origin::upload(&name), &state.processor);
        spans += state.corpus.write().await.add_document(doc);
        files.push(name);
    }

    if files.is_empty() {
        return Err(ApiError::BadRequest("no files in upload".to_string()));
    }
    info!("Ingested {} uploaded files, {} spans", files.len(), spans);
    Ok(Json(UploadResponse { files, spans }))
}

/// Response to a completed site crawl
#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    /// Pages scraped and ingested
    pub pages: usize,

    /// Total spans added to the corpus
    pub spans: usize,
}

/// Crawl the configured site and ingest its pages
///
/// Pages are also saved under the web data directory so they survive a
/// restart and can be re-ingested from disk.
#[instrument(skip_all)]
pub async fn scrape(State(state): State<AppState>) -> Result<Json<ScrapeResponse>, ApiError> {
    let config = ScraperConfig::builder()
        .base_url(&state.config.site_url)
        .build();
    let pages = crawl_site(&config).await?;
    storage::save_pages(&pages, &state.config.web_dir()).await?;

    let mut spans = 0;
    {
        let mut corpus = state.corpus.write().await;
        for page in &pages {
            let doc = process(&page.text, Origin::web(&page.url), &state.processor);
            spans += corpus.add_document(doc);
        }
    }

    info!("Ingested {} scraped pages, {} spans", pages.len(), spans);
    Ok(Json(ScrapeResponse {
        pages: pages.len(),
        spans,
    }))
}

/// One question for the chatbot
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The question text
    pub question: String,
}

/// The assembled reply
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Reply text
    pub answer: String,

    /// Source labels that contributed to the reply
    pub sources: Vec<String>,

    /// Rough confidence in [0, 1]
    pub confidence: f32,
}

/// Answer one question from the current corpus
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".to_string()));
    }

    let answer = state.corpus.read().await.answer(question);
    Ok(Json(AskResponse {
        answer: answer.text,
        sources: answer.sources,
        confidence: answer.confidence,
    }))
}

/// List ingested sources with their span counts
pub async fn sources(State(state): State<AppState>) -> Json<Vec<SourceInfo>> {
    Json(state.corpus.read().await.sources().to_vec())
}

/// Response to a corpus reset
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Entries discarded by the reset
    pub cleared: usize,
}

/// Replace the corpus with an empty one
pub async fn reset(State(state): State<AppState>) -> Json<ResetResponse> {
    let mut corpus = state.corpus.write().await;
    let cleared = corpus.len();
    *corpus = Corpus::new();
    info!("Corpus reset, {} entries cleared", cleared);
    Json(ResetResponse { cleared })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::ServerConfig;
    use std::path::Path;

    fn test_state(data_dir: &Path) -> AppState {
        AppState::new(ServerConfig {
            bind: "127.0.0.1:0".parse().unwrap(),
            site_url: "https://example.com".to_string(),
            data_dir: data_dir.to_path_buf(),
        })
    }

    async fn ingest(state: &AppState, text: &str, origin: Origin) {
        let doc = process(text, origin, &state.processor);
        state.corpus.write().await.add_document(doc);
    }

    #[tokio::test]
    async fn test_ask_rejects_empty_question() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let result = ask(
            State(state),
            Json(AskRequest {
                question: "   ".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_ask_answers_from_ingested_text() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        ingest(
            &state,
            "The spring concert is April 12.",
            Origin::upload("news.txt"),
        )
        .await;

        let Json(response) = ask(
            State(state),
            Json(AskRequest {
                question: "When is the spring concert?".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(response.answer.contains("April 12"));
        assert_eq!(response.sources, vec!["news.txt"]);
        assert!(response.confidence > 0.0);
    }

    #[tokio::test]
    async fn test_sources_lists_ingested_documents() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        ingest(&state, "One span here.", Origin::upload("a.txt")).await;
        ingest(
            &state,
            "Concert parking is free.",
            Origin::web("https://example.com/parking"),
        )
        .await;

        let Json(listed) = sources(State(state)).await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].origin.label(), "a.txt");
        assert_eq!(listed[1].origin.label(), "https://example.com/parking");
    }

    #[tokio::test]
    async fn test_reset_clears_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        ingest(&state, "Rehearsals resume March 3.", Origin::upload("news.txt")).await;

        let Json(response) = reset(State(state.clone())).await;
        assert_eq!(response.cleared, 1);
        assert!(state.corpus.read().await.is_empty());
    }
}
