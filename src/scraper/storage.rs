//! Flat-file persistence for scraped pages
//!
//! Each page is written as a numbered text file whose body carries a short
//! header (URL, title) followed by the extracted text. Files are plain UTF-8
//! so they can be inspected, edited, or re-ingested alongside uploads.

use super::{ScrapeError, ScrapedPage};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const MAX_FILENAME_CHARS: usize = 50;

/// Write scraped pages to `dir` as numbered text files
///
/// Returns the paths written, in page order. The directory is created if it
/// does not exist.
pub async fn save_pages(pages: &[ScrapedPage], dir: &Path) -> Result<Vec<PathBuf>, ScrapeError> {
    fs::create_dir_all(dir).await?;

    let mut saved = Vec::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        let filename = format!("{:03}_{}.txt", i + 1, sanitize_filename(&page.title));
        let path = dir.join(filename);
        let contents = format!("URL: {}\nTitle: {}\n\n{}\n", page.url, page.title, page.text);
        fs::write(&path, contents).await?;
        debug!("Saved {}", path.display());
        saved.push(path);
    }

    info!("Saved {} pages to {}", saved.len(), dir.display());
    Ok(saved)
}

/// Read every `.txt` file in `dir`, sorted by file name
///
/// Returns `(file name, contents)` pairs. A missing directory is treated as
/// empty rather than an error, and file contents are read lossily so a stray
/// non-UTF-8 byte does not sink the whole load.
pub async fn load_saved(dir: &Path) -> Result<Vec<(String, String)>, ScrapeError> {
    if !fs::try_exists(dir).await? {
        return Ok(Vec::new());
    }

    let mut docs = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let bytes = fs::read(&path).await?;
        docs.push((name, String::from_utf8_lossy(&bytes).into_owned()));
    }

    docs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(docs)
}

/// Split a saved page back into its source URL and body text
///
/// Files written by `save_pages` open with `URL:` and `Title:` header lines;
/// both are stripped so only the page text is re-ingested. Files without the
/// header (plain uploads) come back whole with no URL.
pub fn split_header(contents: &str) -> (Option<&str>, &str) {
    let Some(rest) = contents.strip_prefix("URL: ") else {
        return (None, contents);
    };
    let (url, rest) = rest.split_once('\n').unwrap_or((rest, ""));
    let rest = match rest.strip_prefix("Title:") {
        Some(titled) => titled.split_once('\n').map_or("", |(_, body)| body),
        None => rest,
    };
    (Some(url.trim()), rest.trim_start_matches('\n'))
}

/// Replace characters that are unsafe in file names and cap the length
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .take(MAX_FILENAME_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, title: &str, text: &str) -> ScrapedPage {
        ScrapedPage {
            url: url.to_string(),
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let pages = vec![
            page("https://example.com/", "Home", "Welcome to the orchestra."),
            page("https://example.com/events", "Events", "Spring concert April 12."),
        ];

        let saved = save_pages(&pages, dir.path()).await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].file_name().unwrap(), "001_Home.txt");

        let loaded = load_saved(dir.path()).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].0, "001_Home.txt");
        assert!(loaded[0].1.starts_with("URL: https://example.com/\nTitle: Home\n\n"));
        assert!(loaded[1].1.contains("Spring concert April 12."));
    }

    #[tokio::test]
    async fn test_sanitizes_title_in_filename() {
        let dir = tempfile::tempdir().unwrap();
        let pages = vec![page(
            "https://example.com/faq",
            "FAQ: tickets / parking?",
            "Parking is free.",
        )];

        let saved = save_pages(&pages, dir.path()).await.unwrap();
        assert_eq!(saved[0].file_name().unwrap(), "001_FAQ_ tickets _ parking_.txt");
    }

    #[tokio::test]
    async fn test_load_ignores_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "Rehearsals resume March 3.")
            .await
            .unwrap();
        fs::write(dir.path().join("image.png"), [0u8, 1, 2]).await.unwrap();

        let loaded = load_saved(dir.path()).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0, "notes.txt");
    }

    #[tokio::test]
    async fn test_split_header_drops_url_and_title_lines() {
        let dir = tempfile::tempdir().unwrap();
        let pages = vec![page(
            "https://example.com/events",
            "Events",
            "Spring concert April 12.",
        )];
        save_pages(&pages, dir.path()).await.unwrap();
        let loaded = load_saved(dir.path()).await.unwrap();

        let (url, body) = split_header(&loaded[0].1);
        assert_eq!(url, Some("https://example.com/events"));
        assert_eq!(body.trim_end(), "Spring concert April 12.");
        assert!(!body.contains("Title:"));
    }

    #[test]
    fn test_split_header_passes_plain_uploads_through() {
        let contents = "Rehearsals resume March 3.";
        let (url, body) = split_header(contents);
        assert!(url.is_none());
        assert_eq!(body, contents);
    }

    #[tokio::test]
    async fn test_load_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nothing-here");

        assert!(load_saved(&missing).await.unwrap().is_empty());
    }
}
