//! Single-pass site crawl: the root page plus its direct links

use super::extract::{extract_links, extract_page};
use super::{ScrapeError, ScrapedPage, ScraperConfig};
use reqwest::Client;
use std::collections::HashSet;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Crawl the configured site and return its pages as readable text
///
/// The root page is fetched first and its links collected. Each same-site
/// link is then fetched once, in document order, up to the configured page
/// limit. Links found on those pages are not followed further. A page that
/// fails to fetch or parse is logged and skipped without retry; only a
/// failure on the root page fails the crawl.
#[instrument(skip(config), fields(url = %config.base_url))]
pub async fn crawl_site(config: &ScraperConfig) -> Result<Vec<ScrapedPage>, ScrapeError> {
    let base = Url::parse(&config.base_url)?;
    let client = Client::builder()
        .timeout(config.timeout())
        .user_agent(&config.user_agent)
        .build()?;

    let root = normalize(&base);
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(root.as_str().to_string());

    let html = fetch(&client, &root).await?;
    let links = extract_links(&root, &html);
    debug!("Root page listed {} links", links.len());

    let mut pages = Vec::new();
    match extract_page(root.as_str(), &html) {
        Ok(page) if !page.text.is_empty() => pages.push(page),
        Ok(_) => debug!("Root page has no text content"),
        Err(e) => warn!("Failed to extract root page: {}", e),
    }

    for link in links {
        if pages.len() >= config.max_pages {
            debug!("Reached page limit of {}", config.max_pages);
            break;
        }
        if link.host_str() != base.host_str() {
            continue;
        }
        let link = normalize(&link);
        if !seen.insert(link.as_str().to_string()) {
            continue;
        }

        sleep(config.delay()).await;
        match fetch(&client, &link).await {
            Ok(html) => match extract_page(link.as_str(), &html) {
                Ok(page) if !page.text.is_empty() => {
                    debug!("Scraped {}", link);
                    pages.push(page);
                }
                Ok(_) => debug!("Skipping {}: no text content", link),
                Err(e) => warn!("Skipping {}: {}", link, e),
            },
            Err(e) => warn!("Skipping {}: {}", link, e),
        }
    }

    info!("Scraped {} pages from {}", pages.len(), config.base_url);
    Ok(pages)
}

async fn fetch(client: &Client, url: &Url) -> Result<String, ScrapeError> {
    let response = client.get(url.clone()).send().await?;
    Ok(response.error_for_status()?.text().await?)
}

/// Strip the fragment and query so revisits of the same page are detected
fn normalize(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);
    url.set_query(None);
    url
}
