//! Error responses for the HTTP API

use crate::scraper::ScrapeError;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Error type for API handlers, rendered as a JSON body with a status code
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself was malformed or incomplete
    #[error("{0}")]
    BadRequest(String),

    /// Reading the multipart upload failed
    #[error("upload error: {0}")]
    Multipart(#[from] MultipartError),

    /// The site crawl failed outright
    #[error("scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// Filesystem error while persisting documents
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Scrape(_) => StatusCode::BAD_GATEWAY,
            ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!("Request failed with {}: {}", status, self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
