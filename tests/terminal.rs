//! Terminal ticks: fallback to stale data, config halts, empty warnings.

mod common;

use std::time::Duration;

use futures_util::StreamExt;

use cmc_terminal::client::CmcClient;
use cmc_terminal::terminal::{Severity, Terminal, TerminalOptions};

use common::{empty_payload, three_assets, FakeSource, Step};

fn terminal(source: FakeSource, ttl: Duration) -> Terminal {
    let client = CmcClient::builder()
        .cache_ttl(ttl)
        .source(source)
        .build()
        .unwrap();
    let options = TerminalOptions {
        limit: 3,
        page_size: 2,
        refresh_interval: Duration::from_millis(30),
        ..Default::default()
    };
    Terminal::new(client, options).unwrap()
}

#[tokio::test]
async fn test_tick_renders_table_summary_and_status() {
    let mut t = terminal(FakeSource::new(three_assets()), Duration::from_secs(120));
    t.view_mut().select_symbol(Some("ETH".to_string()));

    let frame = t.tick().await;
    assert!(frame.notices.is_empty());
    assert!(!frame.stale);

    let table = frame.table.as_ref().unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.page.total_pages, 2);

    let summary = frame.summary.as_ref().unwrap();
    assert_eq!(summary.total_market_cap, Some(1_388_000_000_000.0));
    assert_eq!(frame.metrics[1].label, "BTC Market Cap");

    let detail = frame.detail.as_ref().unwrap();
    assert_eq!(detail.name, "Ethereum");
    assert_eq!(detail.price, "$3,000.0000");
    assert_eq!(frame.symbol_options, ["BTC", "ETH", "XRP"]);

    let status = frame.status.as_ref().unwrap();
    assert_eq!(status.api_status(), "OK");
    assert_eq!(status.credit_count, Some(1));
}

#[tokio::test]
async fn test_page_index_written_back_after_clamp() {
    let mut t = terminal(FakeSource::new(three_assets()), Duration::from_secs(120));
    t.view_mut().page_index = 10;
    let frame = t.tick().await;
    assert_eq!(frame.table.unwrap().page.index, 1);
    assert_eq!(t.view().page_index, 1);
}

#[tokio::test]
async fn test_upstream_failure_falls_back_to_stale_snapshot() {
    let source = FakeSource::new(three_assets()).then(Step::Ok(three_assets())).then(Step::Timeout);
    let mut t = terminal(source, Duration::from_millis(20));

    let fresh = t.tick().await;
    assert!(fresh.has_data());
    tokio::time::sleep(Duration::from_millis(40)).await;

    let frame = t.tick().await;
    assert!(frame.stale);
    assert!(frame.has_data());
    let errors: Vec<_> = frame.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].dismissible);
    assert_eq!(frame.status, fresh.status);
}

#[tokio::test]
async fn test_upstream_failure_without_cache_has_no_data() {
    let source = FakeSource::new(three_assets()).then(Step::Timeout);
    let mut t = terminal(source, Duration::from_secs(120));

    let frame = t.tick().await;
    assert!(!frame.has_data());
    assert!(!frame.stale);
    assert_eq!(frame.errors().count(), 1);
}

#[tokio::test]
async fn test_config_error_halts_data_panels() {
    let source = FakeSource::new(three_assets()).then(Step::MissingKey);
    let mut t = terminal(source, Duration::from_secs(120));

    let frame = t.tick().await;
    assert!(!frame.has_data());
    assert!(frame.summary.is_none());
    assert!(frame.status.is_none());
    assert_eq!(frame.notices.len(), 1);
    assert_eq!(frame.notices[0].severity, Severity::Error);
    assert!(!frame.notices[0].dismissible);
}

#[tokio::test]
async fn test_empty_payload_is_a_warning() {
    let mut t = terminal(FakeSource::new(empty_payload()), Duration::from_secs(120));
    let frame = t.tick().await;
    assert!(frame.has_data());
    assert_eq!(frame.notices.len(), 1);
    assert_eq!(frame.notices[0].severity, Severity::EmptyResultWarning);
    assert_eq!(frame.errors().count(), 0);
}

#[tokio::test]
async fn test_rerender_uses_cache() {
    let source = FakeSource::new(three_assets());
    let calls = source.counter();
    let mut t = terminal(source, Duration::from_secs(120));

    t.tick().await;
    t.view_mut().set_search("xrp");
    let frame = t.rerender().await;

    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    let table = frame.table.unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].symbol, "XRP");
}

#[tokio::test]
async fn test_frames_yields_one_frame_per_interval() {
    let source = FakeSource::new(three_assets());
    let calls = source.counter();
    let mut t = terminal(source, Duration::from_millis(10));

    let frames: Vec<_> = t.frames().take(3).collect().await;
    assert_eq!(frames.len(), 3);
    assert!(frames.iter().all(|f| f.has_data()));
    // TTL is shorter than the refresh interval, so each tick refetches.
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
}
