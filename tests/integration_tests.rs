//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: card API pages → throttled harvest → transformed output

use mtg_harvest::card::{Card, Transform};
use mtg_harvest::config::AppConfig;
use mtg_harvest::fetcher::MtgClient;
use mtg_harvest::http::HttpClient;
use mtg_harvest::output::{CardWriter, OutputFormat};
use mtg_harvest::throttle::{SharedSink, ThrottleConfig, Throttler};
use mtg_harvest::Error;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOTAL_PAGES: u32 = 4;

fn fast_throttle(max_burst: usize) -> ThrottleConfig {
    ThrottleConfig::new()
        .with_max_burst(max_burst)
        .with_tick_interval(Duration::from_millis(10))
}

fn client_for(server: &MockServer) -> Arc<MtgClient> {
    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    let http = HttpClient::with_config(config.http_client_config()).unwrap();
    Arc::new(MtgClient::new(http))
}

fn page_cards(page: u32) -> serde_json::Value {
    let colors = if page % 2 == 0 {
        json!(["Blue", "Red"])
    } else {
        json!(["Green"])
    };
    json!({
        "cards": [
            {"name": format!("Card {page}a"), "colors": colors, "rarity": "Common", "set": "KTK"},
            {"name": format!("Card {page}b"), "rarity": "Rare", "set": format!("S{page:02}")}
        ]
    })
}

/// Mounts pages `1..=total`; page 1 carries the pagination headers
async fn mount_pages(server: &MockServer, total: u32) {
    let last = format!("<{}/cards?page={total}>; rel=\"last\"", server.uri());

    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", last.as_str())
                .insert_header("Ratelimit-Remaining", "4999")
                .set_body_json(page_cards(1)),
        )
        .expect(1)
        .mount(server)
        .await;

    for page in 2..=total {
        Mock::given(method("GET"))
            .and(path("/cards"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_cards(page)))
            .mount(server)
            .await;
    }
}

// ============================================================================
// Harvest Tests
// ============================================================================

#[tokio::test]
async fn test_harvest_collects_every_page() {
    let server = MockServer::start().await;
    mount_pages(&server, TOTAL_PAGES).await;

    let sink = SharedSink::new();
    let throttler = Throttler::new(client_for(&server), sink.clone()).with_config(fast_throttle(2));
    let stats = assert_ok!(throttler.run().await);

    assert_eq!(stats.total_pages, TOTAL_PAGES);
    assert_eq!(stats.remaining_quota, 4999);
    assert_eq!(stats.records, 8);
    assert_eq!(stats.retries, 0);
    assert!(stats.largest_burst <= 2);

    let mut names: Vec<String> = sink.take().await.into_iter().map(|c| c.name).collect();
    names.sort();
    let mut expected: Vec<String> = (1..=TOTAL_PAGES)
        .flat_map(|p| [format!("Card {p}a"), format!("Card {p}b")])
        .collect();
    expected.sort();
    assert_eq!(names, expected);

    let progress = throttler.progress().await;
    assert!(progress.is_complete());
}

#[tokio::test]
async fn test_harvest_requeues_page_after_server_error() {
    let server = MockServer::start().await;

    // Page 3 fails once before the regular mock takes over
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(503).set_body_string("\"Service Unavailable\""))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_pages(&server, TOTAL_PAGES).await;

    let sink = SharedSink::new();
    let throttler = Throttler::new(client_for(&server), sink.clone()).with_config(fast_throttle(3));
    let stats = assert_ok!(throttler.run().await);

    assert_eq!(stats.retries, 1);
    assert_eq!(stats.faults, 0);
    assert_eq!(stats.records, 8);

    let cards = sink.take().await;
    let page_three = cards.iter().filter(|c| c.name.starts_with("Card 3")).count();
    assert_eq!(page_three, 2);
}

#[tokio::test]
async fn test_harvest_single_page_without_link_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Ratelimit-Remaining", "120")
                .set_body_json(page_cards(1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sink = SharedSink::new();
    let throttler = Throttler::new(client_for(&server), sink.clone()).with_config(fast_throttle(3));
    let stats = assert_ok!(throttler.run().await);

    assert_eq!(stats.total_pages, 1);
    assert_eq!(stats.bursts, 0);
    assert_eq!(sink.len().await, 2);
}

#[tokio::test]
async fn test_harvest_bootstrap_failure_fetches_nothing_else() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Forbidden"})))
        .expect(1)
        .mount(&server)
        .await;

    let sink: SharedSink<Card> = SharedSink::new();
    let throttler = Throttler::new(client_for(&server), sink.clone()).with_config(fast_throttle(3));
    let err = assert_err!(throttler.run().await);

    assert!(err.is_fatal());
    assert!(matches!(err, Error::Bootstrap { .. }));
    assert!(err.to_string().contains("Forbidden"));
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn test_harvest_with_quota_guard() {
    let server = MockServer::start().await;
    mount_pages(&server, TOTAL_PAGES).await;

    let mut config = AppConfig::from_yaml(
        "api:\n  quota_per_hour: 3600\nthrottle:\n  max_burst: 4\n  tick_interval_ms: 10\n",
    )
    .unwrap();
    config.api.base_url = server.uri();
    let http = HttpClient::with_config(config.http_client_config()).unwrap();
    assert!(http.has_rate_limiter());

    let sink = SharedSink::new();
    let throttler =
        Throttler::new(Arc::new(MtgClient::new(http)), sink.clone()).with_config(config.throttle);
    let stats = assert_ok!(throttler.run().await);

    assert_eq!(stats.records, 8);
}

// ============================================================================
// Transform + Output Tests
// ============================================================================

#[tokio::test]
async fn test_harvest_then_filter_and_render() {
    let server = MockServer::start().await;
    mount_pages(&server, TOTAL_PAGES).await;

    let sink = SharedSink::new();
    let throttler = Throttler::new(client_for(&server), sink.clone()).with_config(fast_throttle(3));
    assert_ok!(throttler.run().await);

    let mut cards = Transform::ktk_red_blue().apply(sink.take().await);
    cards.sort_by(|a, b| a.name.cmp(&b.name));

    let mut writer = CardWriter::new(Vec::new(), OutputFormat::Pretty);
    assert_eq!(writer.write_cards(&cards).unwrap(), 2);
    assert_eq!(
        String::from_utf8(writer.into_inner()).unwrap(),
        "Name: Card 2a - Colors: [Blue Red] - Rarity: Common - Set: KTK\n\
         Name: Card 4a - Colors: [Blue Red] - Rarity: Common - Set: KTK\n"
    );
}

#[tokio::test]
async fn test_harvest_sorted_by_set() {
    let server = MockServer::start().await;
    mount_pages(&server, 3).await;

    let sink = SharedSink::new();
    let throttler = Throttler::new(client_for(&server), sink.clone()).with_config(fast_throttle(1));
    assert_ok!(throttler.run().await);

    let cards = Transform::SortBySet.apply(sink.take().await);
    let sets: Vec<&str> = cards.iter().map(|c| c.set.as_str()).collect();
    assert_eq!(sets, vec!["KTK", "KTK", "KTK", "S01", "S02", "S03"]);
}
