//! Content and link extraction from fetched HTML

use super::{ScrapeError, ScrapedPage};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text is carried by the page: paragraphs, headings, list items
const CONTENT_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, li";

/// Containers whose text is boilerplate rather than content
const BOILERPLATE_TAGS: [&str; 6] = ["nav", "header", "footer", "aside", "script", "style"];

fn selector(selectors: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selectors)
        .map_err(|e| ScrapeError::HtmlParse(format!("failed to parse selector '{selectors}': {e}")))
}

/// Strip a fetched page down to its title and readable text
///
/// Text is gathered from paragraphs, headings, and list items, skipping
/// anything nested inside navigation or other boilerplate containers. Blocks
/// are separated by blank lines so the text processor sees them as
/// paragraphs.
pub fn extract_page(url: &str, html: &str) -> Result<ScrapedPage, ScrapeError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector("title")?)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| url.to_string());

    let mut blocks = Vec::new();
    for element in document.select(&selector(CONTENT_SELECTOR)?) {
        if in_boilerplate(&element) {
            continue;
        }
        let text = collapse_whitespace(&element.text().collect::<String>());
        if !text.is_empty() {
            blocks.push(text);
        }
    }
    // A list item wrapping a paragraph yields the same text twice.
    blocks.dedup();

    Ok(ScrapedPage {
        url: url.to_string(),
        title,
        text: blocks.join("\n\n"),
    })
}

/// Absolute http(s) links found on the page, fragments and queries stripped
pub fn extract_links(base: &Url, html: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for element in document.select(&anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Ok(mut link) = base.join(href) {
            link.set_fragment(None);
            link.set_query(None);
            if matches!(link.scheme(), "http" | "https") {
                links.push(link);
            }
        }
    }
    links
}

fn in_boilerplate(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| BOILERPLATE_TAGS.contains(&ancestor.value().name()))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head><title>  Bridgeland Orchestra </title></head>
          <body>
            <nav><ul><li>Home</li><li>Events</li></ul></nav>
            <h1>Upcoming Events</h1>
            <p>The spring concert is on
               April 12.</p>
            <ul><li>Doors open at 6 pm</li></ul>
            <a href="/events#spring">Events</a>
            <a href="/tickets?ref=home">Tickets</a>
            <a href="mailto:info@example.com">Mail</a>
            <a href="https://other.example/about">About</a>
            <footer><p>Copyright notice</p></footer>
          </body>
        </html>
    "#;

    #[test]
    fn test_extract_page_title_and_text() {
        let page = extract_page("https://example.com/", PAGE).unwrap();

        assert_eq!(page.title, "Bridgeland Orchestra");
        assert_eq!(
            page.text,
            "Upcoming Events\n\nThe spring concert is on April 12.\n\nDoors open at 6 pm"
        );
    }

    #[test]
    fn test_extract_page_skips_boilerplate() {
        let page = extract_page("https://example.com/", PAGE).unwrap();

        assert!(!page.text.contains("Home"));
        assert!(!page.text.contains("Copyright notice"));
    }

    #[test]
    fn test_extract_page_without_title_uses_url() {
        let page = extract_page("https://example.com/x", "<p>Hello there.</p>").unwrap();
        assert_eq!(page.title, "https://example.com/x");
    }

    #[test]
    fn test_extract_links_normalized() {
        let base = Url::parse("https://example.com/").unwrap();
        let links = extract_links(&base, PAGE);

        let as_strings: Vec<_> = links.iter().map(Url::as_str).collect();
        assert_eq!(
            as_strings,
            vec![
                "https://example.com/events",
                "https://example.com/tickets",
                "https://other.example/about",
            ]
        );
    }

    #[test]
    fn test_extract_links_empty_document() {
        let base = Url::parse("https://example.com/").unwrap();
        assert!(extract_links(&base, "<html></html>").is_empty());
    }
}
