//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Local HTTP responders standing in for the remote APIs
//! - Models and configs wired to those responders
//! - Driving the update loop until background work settles

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use termfolio::actors::TickerSlot;
use termfolio::app::execute_command;
use termfolio::config::Config;
use termfolio::output::Block;
use termfolio::prefs::MemoryPreferences;
use termfolio::remote::{NoClipboard, Remote};
use termfolio::shell::Entry;
use termfolio::tea::{update, Message, Model};
use termfolio::theme::ThemeStore;

/// One canned HTTP response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: "{}".to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A local server answering every request with the same reply and
/// recording request lines (`GET /path?query HTTP/1.1`).
pub struct Responder {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl Responder {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let reply = reply.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&buf);
                    if let Some(line) = head.lines().next() {
                        recorded.lock().unwrap().push(line.to_string());
                    }

                    tokio::time::sleep(reply.delay).await;
                    let response = format!(
                        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        reply.status,
                        reply.body.len(),
                        reply.body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// A base URL nothing listens on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Config pointing every endpoint at `base_url`.
pub fn config_for(base_url: &str) -> Config {
    Config {
        github_user: Some("octocat".to_string()),
        request_timeout_ms: Some(2_000),
        github_api: Some(base_url.to_string()),
        price_api: Some(base_url.to_string()),
        quote_api: Some(base_url.to_string()),
        ..Config::default()
    }
}

pub fn test_model(config: Config) -> Model {
    let theme = ThemeStore::restore(Box::new(MemoryPreferences::new()), None);
    Model::new(theme, config, (80, 24))
}

/// The model plus the runtime pieces `LogicThread` would own.
pub struct Harness {
    pub model: Model,
    pub remote: Arc<Remote>,
    pub msg_tx: mpsc::UnboundedSender<Message>,
    pub msg_rx: mpsc::UnboundedReceiver<Message>,
    pub ticker: TickerSlot,
}

impl Harness {
    pub fn new(config: Config) -> Self {
        let remote = Arc::new(Remote::new(&config, Arc::new(NoClipboard)).unwrap());
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            model: test_model(config),
            remote,
            msg_tx,
            msg_rx,
            ticker: TickerSlot::new(),
        }
    }

    /// Feed a message and execute resulting commands. Returns true on quit.
    pub fn send(&mut self, msg: Message) -> bool {
        let mut quit = false;
        for cmd in update(&mut self.model, msg) {
            quit |= execute_command(cmd, &self.remote, &self.msg_tx, &mut self.ticker);
        }
        quit
    }

    pub fn key(&mut self, code: KeyCode) -> bool {
        self.send(Message::Key(KeyEvent::new(code, KeyModifiers::empty())))
    }

    /// Type a line and press Enter.
    pub fn type_line(&mut self, line: &str) -> bool {
        for c in line.chars() {
            self.key(KeyCode::Char(c));
        }
        self.key(KeyCode::Enter)
    }

    /// Wait for the next background message and apply it.
    pub async fn pump_one(&mut self) {
        let msg = tokio::time::timeout(Duration::from_secs(5), self.msg_rx.recv())
            .await
            .expect("timed out waiting for a background message")
            .expect("message channel closed");
        self.send(msg);
    }

    /// Apply background messages until no remote ticket is pending.
    pub async fn settle(&mut self) {
        while self.model.shell.pending().next().is_some() {
            self.pump_one().await;
        }
    }

    pub fn outputs(&self) -> Vec<Block> {
        outputs(&self.model)
    }

    pub fn last_output(&self) -> Block {
        self.outputs().pop().expect("no output in log")
    }
}

/// Output blocks in log order.
pub fn outputs(model: &Model) -> Vec<Block> {
    model
        .shell
        .log()
        .entries()
        .iter()
        .filter_map(|e| match e {
            Entry::Output(block) => Some(block.clone()),
            Entry::Prompt(_) => None,
        })
        .collect()
}
