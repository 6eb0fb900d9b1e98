//! Remote command tests against local responders: success rendering,
//! failure classification, timeouts, and completion ordering.

use std::sync::Arc;
use std::time::Duration;

use termfolio::app::Headless;
use termfolio::config::Config;
use termfolio::output::Class;
use termfolio::prefs::MemoryPreferences;
use termfolio::remote::{ClipboardSink, Remote, RemoteRequest};
use termfolio::Result;

use super::fixtures::{closed_endpoint, config_for, outputs, Harness, Reply, Responder};

const BITCOIN: &str = r#"{"bitcoin":{"usd":64000.5,"brl":350000.25}}"#;

fn repos_json(count: usize) -> String {
    let repos: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"name":"repo-{i}","html_url":"https://github.com/octocat/repo-{i}","description":null,"stargazers_count":{i}}}"#
            )
        })
        .collect();
    format!("[{}]", repos.join(","))
}

// ═══════════════════════════════════════════════════════════════════════════
// Price Tests
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_crypto_renders_both_currencies() {
    let server = Responder::start(Reply::json(BITCOIN)).await;
    let mut h = Harness::new(config_for(&server.base_url));

    h.type_line("crypto bitcoin");
    h.settle().await;

    assert_eq!(
        h.last_output().to_plain_text(),
        "bitcoin: $64,000.50  |  R$ 350.000,25"
    );
    let requests = server.request_lines();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET /simple/price?"));
    assert!(requests[0].contains("ids=bitcoin"));
}

#[tokio::test]
async fn test_crypto_unknown_asset_is_not_found() {
    let server = Responder::start(Reply::json("{}")).await;
    let mut h = Harness::new(config_for(&server.base_url));

    h.type_line("crypto notacoin");
    h.settle().await;

    let block = h.last_output();
    assert_eq!(block.lines.len(), 1);
    assert!(block.has_class(Class::Error));
    assert!(block.contains("'notacoin' not found"));
}

#[tokio::test]
async fn test_crypto_server_error_is_single_line() {
    let server = Responder::start(Reply::status(500)).await;
    let mut h = Harness::new(config_for(&server.base_url));
    let before = outputs(&h.model).len();

    h.type_line("crypto bitcoin");
    h.settle().await;

    let blocks = outputs(&h.model);
    assert_eq!(blocks.len(), before + 1);
    let block = &blocks[before];
    assert_eq!(block.lines.len(), 1);
    assert!(block.contains("HTTP 500"));
    assert!(h.model.input_enabled());
}

#[tokio::test]
async fn test_crypto_unreachable_endpoint() {
    let base = closed_endpoint().await;
    let mut h = Harness::new(config_for(&base));

    h.type_line("crypto bitcoin");
    h.settle().await;

    let block = h.last_output();
    assert_eq!(block.lines.len(), 1);
    assert!(block.contains("Failed to fetch the price of 'bitcoin'"));
}

#[tokio::test]
async fn test_crypto_without_argument_prints_usage() {
    let mut h = Harness::new(Config::default());
    h.type_line("crypto");
    assert!(h.model.shell.pending().next().is_none());
    assert!(h.last_output().contains("crypto <id>"));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = Responder::start(Reply::json(BITCOIN).delayed(Duration::from_secs(3))).await;
    let config = Config {
        request_timeout_ms: Some(200),
        ..config_for(&server.base_url)
    };
    let mut h = Harness::new(config);

    h.type_line("crypto bitcoin");
    h.settle().await;

    assert!(h.last_output().contains("timed out"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Repository and Quote Tests
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_github_lists_at_most_five() {
    let server = Responder::start(Reply::json(&repos_json(7))).await;
    let mut h = Harness::new(config_for(&server.base_url));

    h.type_line("github");
    h.settle().await;

    let text = h.last_output().to_plain_text();
    assert!(text.contains("1. repo-0 - https://github.com/octocat/repo-0"));
    assert!(text.contains("5. repo-4"));
    assert!(!text.contains("repo-5"));
    assert!(text.contains("No description."));

    let requests = server.request_lines();
    assert!(requests[0].starts_with("GET /users/octocat/repos?"));
    assert!(requests[0].contains("sort=updated"));
    assert!(requests[0].contains("per_page=5"));
}

#[tokio::test]
async fn test_github_not_found() {
    let server = Responder::start(Reply::status(404)).await;
    let mut h = Harness::new(config_for(&server.base_url));

    h.type_line("github");
    h.settle().await;

    let block = h.last_output();
    assert!(block.contains("Failed to fetch repositories"));
    assert!(block.contains("404"));
}

#[tokio::test]
async fn test_motd_renders_quote_and_author() {
    let server =
        Responder::start(Reply::json(r#"{"id":1,"quote":"Stay hungry.","author":"Steve Jobs"}"#))
            .await;
    let mut h = Harness::new(config_for(&server.base_url));

    h.type_line("motd");
    h.settle().await;

    let text = h.last_output().to_plain_text();
    assert!(text.contains("\"Stay hungry.\""));
    assert!(text.contains("Steve Jobs"));
    assert!(server.request_lines()[0].starts_with("GET /quotes/random"));
}

#[tokio::test]
async fn test_motd_malformed_body_uses_fallback() {
    let server = Responder::start(Reply::json(r#"{"unexpected":true}"#)).await;
    let mut h = Harness::new(config_for(&server.base_url));

    h.type_line("motd");
    h.settle().await;

    assert_eq!(
        h.last_output().to_plain_text(),
        "Could not load a quote right now."
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Ordering Tests - overlapping requests append in completion order
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_overlapping_requests_append_in_completion_order() {
    let slow = Responder::start(
        Reply::json(r#"{"quote":"Slow.","author":"Tortoise"}"#).delayed(Duration::from_millis(400)),
    )
    .await;
    let fast = Responder::start(Reply::json(BITCOIN)).await;
    let config = Config {
        quote_api: Some(slow.base_url.clone()),
        price_api: Some(fast.base_url.clone()),
        ..Config::default()
    };
    let mut h = Harness::new(config);

    h.type_line("motd");
    h.type_line("crypto bitcoin");
    assert_eq!(h.model.shell.pending().count(), 2);
    h.settle().await;

    let blocks = outputs(&h.model);
    let n = blocks.len();
    assert!(blocks[n - 2].contains("bitcoin: $64,000.50"));
    assert!(blocks[n - 1].contains("Tortoise"));
}

#[tokio::test]
async fn test_input_stays_enabled_while_request_pending() {
    let server = Responder::start(Reply::json(BITCOIN).delayed(Duration::from_millis(300))).await;
    let mut h = Harness::new(config_for(&server.base_url));

    h.type_line("crypto bitcoin");
    assert!(h.model.input_enabled());
    h.type_line("whoami");
    assert_eq!(h.last_output().to_plain_text(), "guest");

    h.settle().await;
    assert!(h.last_output().contains("bitcoin"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Clipboard Tests
// ═══════════════════════════════════════════════════════════════════════════

struct RecordingClipboard(std::sync::Mutex<Vec<String>>);

impl ClipboardSink for RecordingClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_email_copies_configured_address() {
    let clipboard = Arc::new(RecordingClipboard(std::sync::Mutex::new(Vec::new())));
    let config = Config {
        contact_email: Some("me@example.com".to_string()),
        ..Config::default()
    };
    let remote = Remote::new(&config, clipboard.clone()).unwrap();

    let block = remote.run(&RemoteRequest::CopyEmail).await;
    assert_eq!(
        block.to_plain_text(),
        "Email me@example.com copied to the clipboard!"
    );
    assert_eq!(*clipboard.0.lock().unwrap(), vec!["me@example.com".to_string()]);
}

#[tokio::test]
async fn test_headless_exec_awaits_price() {
    let server = Responder::start(Reply::json(BITCOIN)).await;
    let mut app = Headless::new(
        config_for(&server.base_url),
        Box::new(MemoryPreferences::new()),
        Arc::new(RecordingClipboard(std::sync::Mutex::new(Vec::new()))),
    )
    .unwrap();

    let blocks = app.run("crypto bitcoin").await;
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].contains("R$ 350.000,25"));
}
