//! Page fetching and readable-text extraction.
//!
//! Each page is fetched once. The HTML goes through a readability pass
//! first; if that fails or finds nothing, a paragraph scrape over the same
//! HTML with boilerplate removed is used instead. Failures never escape
//! [`Extractor::extract`]: an empty string means "no usable content".

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::http::{self, ClientRole};
use dom_smoothie::Readability;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};

/// Containers whose paragraphs and text never count as article content.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "form", "noscript", "svg", "iframe",
];

/// Fetches pages and extracts their main text.
#[derive(Debug, Clone)]
pub struct Extractor {
    client: reqwest::Client,
}

impl Extractor {
    /// Wrap an existing client. Its timeout bounds every page fetch.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build an extractor with a client configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Ok(Self::new(http::build_client(config, ClientRole::Page)?))
    }

    /// Fetch `url` and return up to `max_chars` characters of readable text.
    ///
    /// Returns an empty string when the page cannot be fetched (network
    /// error, timeout, non-200 status) or neither extraction strategy finds
    /// any text.
    pub async fn extract(&self, url: &str, max_chars: usize) -> String {
        let html = match self.fetch_html(url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::debug!(url, error = %err, "page fetch failed");
                return String::new();
            }
        };

        match extract_readable(&html, url, max_chars) {
            Ok(text) => return text,
            Err(err) => {
                tracing::debug!(url, error = %err, "readability pass failed, scraping paragraphs");
            }
        }

        extract_paragraphs(&html, max_chars).unwrap_or_else(|err| {
            tracing::debug!(url, error = %err, "paragraph scrape found nothing");
            String::new()
        })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Fetch(format!("request failed: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::Fetch(format!("unexpected status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| SearchError::Fetch(format!("body read failed: {e}")))
    }
}

/// Run a readability pass over `html` and return its article text.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if readability rejects the document or
/// the article has no text.
pub fn extract_readable(html: &str, url: &str, max_chars: usize) -> Result<String> {
    let mut readability = Readability::new(html, Some(url), None)
        .map_err(|e| SearchError::Parse(format!("readability init failed: {e}")))?;
    let article = readability
        .parse()
        .map_err(|e| SearchError::Parse(format!("readability failed: {e}")))?;

    let text = normalise_whitespace(&article.text_content);
    if text.is_empty() {
        return Err(SearchError::Parse("readability found no article text".into()));
    }
    Ok(truncate_chars(&text, max_chars))
}

/// Join the text of every `<p>` outside boilerplate containers.
///
/// A paragraph nested anywhere under one of [`BOILERPLATE_TAGS`] is skipped,
/// and so is any script or style text inside a kept paragraph.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if no paragraph text remains.
pub fn extract_paragraphs(html: &str, max_chars: usize) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("p")
        .map_err(|e| SearchError::Parse(format!("invalid paragraph selector: {e:?}")))?;

    let text = document
        .select(&selector)
        .filter(|p| !in_boilerplate(*p))
        .map(visible_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return Err(SearchError::Parse("no paragraph text found".into()));
    }
    Ok(truncate_chars(&text, max_chars))
}

/// True if `element` or anything above it is a boilerplate container.
fn in_boilerplate(element: ElementRef<'_>) -> bool {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .any(|el| BOILERPLATE_TAGS.contains(&el.value().name()))
}

/// Text of `paragraph`, leaving out text nested in boilerplate tags.
fn visible_text(paragraph: ElementRef<'_>) -> String {
    let pieces: Vec<&str> = paragraph
        .descendants()
        .filter(|node| {
            node.parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|parent| !in_boilerplate(parent))
        })
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect();
    pieces
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace runs within each line and drop blank lines.
fn normalise_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep at most `max_chars` characters (not bytes).
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_end, _)) => text[..byte_end].to_owned(),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"<html><head><title>Test match report</title></head><body>
        <header>Site header</header>
        <nav><a href="/">Home</a> <a href="/scores">Scores</a></nav>
        <article>
            <h1>India beat Australia in a thrilling finish</h1>
            <p>India completed a remarkable chase on the final day of the fourth Test, reaching the target with three wickets in hand after a tense afternoon session.</p>
            <p>The opening pair laid the foundation with a century stand, before a middle-order collapse brought Australia back into the contest late in the day.</p>
            <p>A composed unbeaten half-century from the wicketkeeper sealed the win and the series, to the delight of a packed crowd at the ground.</p>
            <p>Australia's bowlers, led by their captain, kept the pressure on with a disciplined line outside off stump, and the spinners found sharp turn from the rough as the pitch wore on.</p>
            <p>The visiting captain praised both sides after the match, calling it one of the finest finishes he had been part of, and confirmed the squad would travel home the following week.</p>
        </article>
        <aside>Related: subscribe now</aside>
        <footer>Copyright footer</footer>
        <script>trackPageView();</script>
    </body></html>"#;

    #[test]
    fn readable_extracts_article_body() {
        let text = extract_readable(ARTICLE, "https://example.com/report", 10_000)
            .expect("readability should succeed");
        assert!(text.contains("remarkable chase"));
        assert!(!text.contains("trackPageView"));
        assert!(!text.contains("Copyright footer"));
    }

    #[test]
    fn readable_truncates_to_budget() {
        let text = extract_readable(ARTICLE, "https://example.com/report", 40).expect("readable");
        assert!(text.chars().count() <= 40);
    }

    #[test]
    fn readable_rejects_empty_document() {
        assert!(extract_readable("", "https://example.com", 100).is_err());
    }

    #[test]
    fn paragraphs_joined_with_space() {
        let html = "<html><body><p>First para.</p><div>Not a para</div><p>Second para.</p></body></html>";
        let text = extract_paragraphs(html, 1000).expect("paragraphs");
        assert_eq!(text, "First para. Second para.");
    }

    #[test]
    fn paragraphs_skip_boilerplate_containers() {
        let html = r#"<html><body>
            <header><p>Header para</p></header>
            <nav><p>Nav para</p></nav>
            <form><p>Form para</p><input name="q"></form>
            <aside><p>Aside para</p></aside>
            <p>Body para</p>
            <footer><p>Footer para</p></footer>
        </body></html>"#;
        let text = extract_paragraphs(html, 1000).expect("paragraphs");
        assert_eq!(text, "Body para");
    }

    #[test]
    fn paragraphs_ignore_scripts_and_styles() {
        let html = "<html><head><style>p{color:red}</style></head><body><p>Keep <script>drop()</script>this</p></body></html>";
        let text = extract_paragraphs(html, 1000).expect("paragraphs");
        assert_eq!(text, "Keep this");
    }

    #[test]
    fn paragraphs_missing_is_parse_error() {
        let err = extract_paragraphs("<html><body><div>No paragraphs</div></body></html>", 100)
            .unwrap_err();
        assert!(err.to_string().contains("no paragraph text"));
    }

    #[test]
    fn paragraphs_truncated_to_budget() {
        let html = format!("<p>{}</p>", "word ".repeat(500));
        let text = extract_paragraphs(&html, 25).expect("paragraphs");
        assert_eq!(text.chars().count(), 25);
    }

    #[test]
    fn paragraphs_skip_nested_boilerplate() {
        let html = "<aside><aside>Ad</aside><p>Related: subscribe now</p></aside><p>Body para</p>";
        let text = extract_paragraphs(html, 1000).expect("paragraphs");
        assert_eq!(text, "Body para");
    }

    #[test]
    fn paragraphs_skip_deeply_nested_nav() {
        let html = "<nav><div><nav><a>x</a></nav><div><p>Menu para</p></div></div></nav><p>Story</p>";
        let text = extract_paragraphs(html, 1000).expect("paragraphs");
        assert_eq!(text, "Story");
    }

    #[test]
    fn paragraphs_keep_tag_name_prefixes() {
        let html = "<p>Kept <formula>inline</formula> text</p>";
        let text = extract_paragraphs(html, 1000).expect("paragraphs");
        assert_eq!(text, "Kept inline text");
    }

    #[test]
    fn paragraphs_uppercase_tags_are_still_boilerplate() {
        let html = "<P>a</P><SCRIPT>x()</SCRIPT><ASIDE><P>hidden</P></ASIDE><P>b</P>";
        let text = extract_paragraphs(html, 1000).expect("paragraphs");
        assert_eq!(text, "a b");
    }

    #[test]
    fn whitespace_collapsed() {
        assert_eq!(normalise_whitespace("  a \t  b\n\n\n\nc  "), "a b\nc");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let text = "é".repeat(10);
        let cut = truncate_chars(&text, 4);
        assert_eq!(cut, "éééé");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
