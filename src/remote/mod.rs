//! Remote data commands.
//!
//! Each request runs in its own task and always resolves to a displayable
//! block. Failures are classified (transport/HTTP, missing data, missing
//! capability) and rendered as a single user-facing line; raw errors only
//! reach the log file.

pub mod client;
pub mod clipboard;
pub mod format;

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::output::{Block, Class, Line, Span};
use crate::util::blocking_with_timeout;
use crate::{tlog_debug, tlog_warn, Error, Result};

pub use client::{Price, Quote, RemoteClient, Repo};
pub use clipboard::{ClipboardSink, NoClipboard, SystemClipboard};

const CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    Repos,
    Price { asset: String },
    Quote,
    CopyEmail,
}

impl RemoteRequest {
    pub fn label(&self) -> &'static str {
        match self {
            RemoteRequest::Repos => "repos",
            RemoteRequest::Price { .. } => "price",
            RemoteRequest::Quote => "quote",
            RemoteRequest::CopyEmail => "clipboard",
        }
    }
}

/// Executes remote requests. Cheap to share behind an `Arc`.
pub struct Remote {
    client: RemoteClient,
    clipboard: Arc<dyn ClipboardSink>,
    github_user: String,
    email: String,
}

impl Remote {
    pub fn new(config: &Config, clipboard: Arc<dyn ClipboardSink>) -> Result<Self> {
        Ok(Self {
            client: RemoteClient::new(config)?,
            clipboard,
            github_user: config.effective_github_user().to_string(),
            email: config.effective_contact_email().to_string(),
        })
    }

    /// Run a request to completion. Never fails: every error becomes a block.
    pub async fn run(&self, request: &RemoteRequest) -> Block {
        tlog_debug!("Remote::run {}", request.label());
        match request {
            RemoteRequest::Repos => match self.client.repos(&self.github_user).await {
                Ok(repos) => render_repos(&repos),
                Err(e) => {
                    tlog_warn!("Repository listing failed: {}", e);
                    Block::error(format!("Failed to fetch repositories: {}", reason(&e)))
                }
            },
            RemoteRequest::Price { asset } => match self.client.price(asset).await {
                Ok(price) => render_price(asset, price),
                Err(e) => {
                    tlog_warn!("Price lookup for '{}' failed: {}", asset, e);
                    price_error(asset, &e)
                }
            },
            RemoteRequest::Quote => match self.client.quote().await {
                Ok(quote) => render_quote(&quote),
                Err(e) => {
                    tlog_warn!("Quote fetch failed: {}", e);
                    Block::error("Could not load a quote right now.")
                }
            },
            RemoteRequest::CopyEmail => self.copy_email().await,
        }
    }

    async fn copy_email(&self) -> Block {
        let sink = self.clipboard.clone();
        let email = self.email.clone();
        match blocking_with_timeout(CLIPBOARD_TIMEOUT, move || sink.copy(&email)).await {
            Ok(()) => Block::from_lines(vec![Line::new(vec![
                Span::plain("Email "),
                Span::accent(&self.email),
                Span::plain(" copied to the clipboard!"),
            ])]),
            Err(e) => {
                tlog_warn!("Clipboard copy failed: {}", e);
                Block::error(format!(
                    "Failed to copy the email. Copy it manually: {}",
                    self.email
                ))
            }
        }
    }
}

/// Short, user-facing description of a failure.
pub fn reason(err: &Error) -> String {
    match err {
        Error::HttpStatus(404) => "not found (HTTP 404)".to_string(),
        Error::HttpStatus(code) => format!("the server answered HTTP {code}"),
        Error::Http(e) if e.is_timeout() => "the request timed out".to_string(),
        Error::Http(e) if e.is_decode() => "unexpected response format".to_string(),
        Error::Http(e) if e.is_connect() => "could not reach the server".to_string(),
        Error::Http(_) => "network error".to_string(),
        Error::Json(_) => "unexpected response format".to_string(),
        Error::Timeout(_) => "the request timed out".to_string(),
        Error::MissingData(what) => format!("no data for '{what}'"),
        Error::Clipboard(_) => "clipboard unavailable".to_string(),
        _ => "unexpected error".to_string(),
    }
}

pub fn render_repos(repos: &[Repo]) -> Block {
    if repos.is_empty() {
        return Block::plain("No public repositories found.");
    }
    let mut block = Block::new().with(Line::styled("Recent repositories:", Class::Heading));
    for (i, repo) in repos.iter().enumerate() {
        let description = repo
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("No description.");
        block.push(vec![
            Span::muted(format!("{}. ", i + 1)),
            Span::accent(&repo.name),
            Span::plain(" - "),
            Span::link(&repo.html_url),
        ]);
        block.push(vec![
            Span::plain("   "),
            Span::muted(format!("{} (★ {})", description, repo.stargazers_count)),
        ]);
    }
    block
}

pub fn render_price(asset: &str, price: Price) -> Block {
    Block::from_lines(vec![Line::new(vec![
        Span::accent(asset),
        Span::plain(": "),
        Span::strong(format::usd(price.usd)),
        Span::plain("  |  "),
        Span::strong(format::brl(price.brl)),
    ])])
}

fn price_error(asset: &str, err: &Error) -> Block {
    match err {
        Error::MissingData(_) => Block::error(format!(
            "Asset '{asset}' not found. Try an id like 'bitcoin' or 'ethereum'."
        )),
        other => Block::error(format!(
            "Failed to fetch the price of '{asset}': {}",
            reason(other)
        )),
    }
}

pub fn render_quote(quote: &Quote) -> Block {
    Block::new()
        .with(Line::styled(format!("\"{}\"", quote.quote), Class::Italic))
        .with(Line::styled(format!("    - {}", quote.author), Class::Accent))
}
