//! Integration tests for the search → filter → extract pipeline.
//!
//! Result pages are served by a local `wiremock` server and hits come from
//! an in-process fake provider, so no test here touches the public network.

use std::sync::Mutex;
use std::time::Duration;

use gleaner_search::{
    aggregate, AggregateOptions, Extractor, FilterConfig, ProviderKind, SearchError, SearchHit,
    SearchProvider,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a fixed hit list and records the requested count.
struct FakeProvider {
    hits: Vec<SearchHit>,
    requested: Mutex<Option<usize>>,
}

impl FakeProvider {
    fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            requested: Mutex::new(None),
        }
    }

    fn requested(&self) -> Option<usize> {
        *self.requested.lock().expect("lock")
    }
}

impl SearchProvider for FakeProvider {
    async fn search(&self, _query: &str, count: usize) -> Result<Vec<SearchHit>, SearchError> {
        *self.requested.lock().expect("lock") = Some(count);
        Ok(self.hits.iter().take(count).cloned().collect())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::SerpApi
    }
}

fn article_page(topic: &str) -> String {
    let paragraph = format!(
        "<p>This is a detailed report about {topic}. The match swung back and forth \
         through the afternoon session as both sides traded wickets, and the crowd \
         stayed on until the very last over was bowled in fading light.</p>"
    );
    format!(
        "<html><head><title>{topic}</title></head><body>\
         <nav>Menu Home Scores</nav>\
         <article><h1>{topic}</h1>{}</article>\
         <footer>Footer links</footer></body></html>",
        paragraph.repeat(4)
    )
}

async fn mount_page(server: &MockServer, route: &str, topic: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(article_page(topic)),
        )
        .mount(server)
        .await;
}

fn extractor(timeout: Duration) -> Extractor {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("client");
    Extractor::new(client)
}

#[tokio::test]
async fn cricket_scenario_skips_ads_and_keeps_rank_order() {
    let server = MockServer::start().await;
    for (route, topic) in [
        ("/one", "Topic One"),
        ("/two", "Topic Two"),
        ("/three", "Topic Three"),
        ("/four", "Topic Four"),
    ] {
        mount_page(&server, route, topic).await;
    }
    let base = server.uri();

    let provider = FakeProvider::new(vec![
        SearchHit::new("Sponsored", "https://googleads.g.doubleclick.net/pagead/aclk?sa=L"),
        SearchHit::new("One", format!("{base}/one?utm_source=serp&id=1")),
        SearchHit::new("Promoted", "https://www.googleadservices.com/pagead/aclk?sa=L"),
        SearchHit::new("Two", format!("{base}/two")),
        SearchHit::new("Three", format!("{base}/three")),
        SearchHit::new("Four", format!("{base}/four")),
    ]);

    let results = aggregate(
        &provider,
        &extractor(Duration::from_secs(5)),
        &FilterConfig::default(),
        "cricket",
        2,
        &AggregateOptions::default(),
    )
    .await
    .expect("aggregate");

    assert_eq!(provider.requested(), Some(6));
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "One");
    assert_eq!(results[0].url, format!("{base}/one?id=1"));
    assert_eq!(results[1].title, "Two");
    for result in &results {
        assert!(result.content.contains("detailed report"));
        assert!(result.content.chars().count() <= 2000);
    }
}

#[tokio::test]
async fn returns_fewer_results_when_pages_fail() {
    let server = MockServer::start().await;
    mount_page(&server, "/good", "Good Page").await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><script>render()</script></body></html>",
        ))
        .mount(&server)
        .await;
    let base = server.uri();

    let provider = FakeProvider::new(vec![
        SearchHit::new("Missing", format!("{base}/missing")),
        SearchHit::new("Broken", format!("{base}/broken")),
        SearchHit::new("Blank", format!("{base}/blank")),
        SearchHit::new("Good", format!("{base}/good")),
        SearchHit::new("Ad", "https://ib.adnxs.com/click"),
    ]);

    let results = aggregate(
        &provider,
        &extractor(Duration::from_secs(5)),
        &FilterConfig::default(),
        "cricket",
        3,
        &AggregateOptions::default(),
    )
    .await
    .expect("aggregate");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Good");
}

#[tokio::test]
async fn never_exceeds_limit() {
    let server = MockServer::start().await;
    mount_page(&server, "/page", "Repeated").await;
    let base = server.uri();

    let hits = (0..10)
        .map(|i| SearchHit::new(format!("Hit {i}"), format!("{base}/page?n={i}")))
        .collect();
    let provider = FakeProvider::new(hits);

    for limit in 1..=3 {
        let results = aggregate(
            &provider,
            &extractor(Duration::from_secs(5)),
            &FilterConfig::default(),
            "cricket",
            limit,
            &AggregateOptions::default(),
        )
        .await
        .expect("aggregate");
        assert_eq!(results.len(), limit);
        assert_eq!(provider.requested(), Some(limit * 3));
    }
}

#[tokio::test]
async fn limit_above_cap_is_rejected_before_searching() {
    let provider = FakeProvider::new(Vec::new());

    for limit in [21, 10_000_000_000, usize::MAX / 4, usize::MAX] {
        let err = aggregate(
            &provider,
            &extractor(Duration::from_secs(5)),
            &FilterConfig::default(),
            "cricket",
            limit,
            &AggregateOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
        assert!(err.to_string().contains("at most 20"));
    }
    assert_eq!(provider.requested(), None);
}

#[tokio::test]
async fn huge_limit_with_raised_cap_does_not_preallocate() {
    let provider = FakeProvider::new(Vec::new());
    let options = AggregateOptions {
        max_limit: usize::MAX,
        ..Default::default()
    };

    let results = aggregate(
        &provider,
        &extractor(Duration::from_secs(5)),
        &FilterConfig::default(),
        "cricket",
        usize::MAX / 4,
        &options,
    )
    .await
    .expect("aggregate");
    assert!(results.is_empty());
    assert_eq!(provider.requested(), Some((usize::MAX / 4) * 3));
}

#[tokio::test]
async fn respects_max_chars_and_min_content() {
    let server = MockServer::start().await;
    mount_page(&server, "/long", "Long Page").await;
    Mock::given(method("GET"))
        .and(path("/short"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>Tiny.</p></body></html>"),
        )
        .mount(&server)
        .await;
    let base = server.uri();

    let provider = FakeProvider::new(vec![
        SearchHit::new("Short", format!("{base}/short")),
        SearchHit::new("Long", format!("{base}/long")),
    ]);
    let options = AggregateOptions {
        max_chars: 120,
        min_content_chars: 50,
        ..Default::default()
    };

    let results = aggregate(
        &provider,
        &extractor(Duration::from_secs(5)),
        &FilterConfig::default(),
        "cricket",
        2,
        &options,
    )
    .await
    .expect("aggregate");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Long");
    assert!(results[0].content.chars().count() <= 120);
}

#[tokio::test]
async fn extraction_returns_empty_on_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>Not found page text</p>"))
        .mount(&server)
        .await;

    let text = extractor(Duration::from_secs(5))
        .extract(&format!("{}/gone", server.uri()), 2000)
        .await;
    assert!(text.is_empty());
}

#[tokio::test]
async fn extraction_returns_empty_on_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_page("Slow"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let text = extractor(Duration::from_millis(300))
        .extract(&format!("{}/slow", server.uri()), 2000)
        .await;
    assert!(text.is_empty());
}

#[tokio::test]
async fn extraction_returns_empty_on_connection_refused() {
    // Port 9 (discard) is essentially never listening on test hosts.
    let text = extractor(Duration::from_secs(2))
        .extract("http://127.0.0.1:9/", 2000)
        .await;
    assert!(text.is_empty());
}

#[tokio::test]
async fn extraction_strips_boilerplate() {
    let server = MockServer::start().await;
    mount_page(&server, "/article", "Clean Article").await;

    let text = extractor(Duration::from_secs(5))
        .extract(&format!("{}/article", server.uri()), 5000)
        .await;
    assert!(text.contains("detailed report about Clean Article"));
    assert!(!text.contains("Footer links"));
    assert!(!text.contains("Menu Home Scores"));
}
