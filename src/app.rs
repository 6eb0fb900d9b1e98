use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::actors::{RemoteTask, TickerSlot};
use crate::commands::Registry;
use crate::config::Config;
use crate::output::{Block, Class, Line};
use crate::prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
use crate::remote::{ClipboardSink, Remote, SystemClipboard};
use crate::render::RenderState;
use crate::shell::{Effect, Entry, Shell};
use crate::tea::{update, Command, Message, Model};
use crate::theme::ThemeStore;
use crate::{tlog, tlog_debug, tlog_warn, Result};

const MAX_BG_MESSAGES: usize = 50;

/// Preferences file under ~/.termfolio, or memory when there is no home directory.
pub fn open_preferences() -> Box<dyn PreferenceStore> {
    match Config::prefs_path() {
        Ok(path) => Box::new(FilePreferences::open(&path)),
        Err(e) => {
            tlog_warn!("Preferences not persisted: {}", e);
            Box::new(MemoryPreferences::new())
        }
    }
}

/// Restore the theme and apply a one-off override, if it names a known theme.
pub fn restore_theme(
    prefs: Box<dyn PreferenceStore>,
    config: &Config,
    theme_override: Option<&str>,
) -> ThemeStore {
    let mut theme = ThemeStore::restore(prefs, config.default_theme.as_deref());
    if let Some(name) = theme_override {
        if !theme.apply(&name.to_lowercase()) {
            tlog_warn!("Unknown theme '{}' requested on the command line", name);
        }
    }
    theme
}

pub struct LogicThread;

impl LogicThread {
    pub fn run(
        config: Config,
        theme_override: Option<String>,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        Runtime::new()?.block_on(Self::run_async(config, theme_override, state_tx, shutdown))
    }

    async fn run_async(
        config: Config,
        theme_override: Option<String>,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        let theme = restore_theme(open_preferences(), &config, theme_override.as_deref());
        let remote = Arc::new(Remote::new(&config, Arc::new(SystemClipboard))?);
        let viewport = crossterm::terminal::size().unwrap_or((80, 24));
        let mut model = Model::new(theme, config, viewport);
        tlog_debug!(
            "LogicThread::run_async theme={} viewport={:?}",
            model.theme.active_name(),
            viewport
        );

        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Message>();
        let mut ticker = TickerSlot::new();

        send_state(&state_tx, &model);

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            // Terminal input (priority)
            while event::poll(Duration::ZERO)? {
                let msg = match event::read()? {
                    Event::Key(key) => Message::Key(key),
                    Event::Resize(width, height) => Message::Resize(width, height),
                    _ => continue,
                };

                for cmd in update(&mut model, msg) {
                    if execute_command(cmd, &remote, &msg_tx, &mut ticker) {
                        shutdown.store(true, Ordering::Relaxed);
                        ticker.stop();
                        return Ok(());
                    }
                }

                if model.dirty {
                    send_state(&state_tx, &model);
                    model.dirty = false;
                }
            }

            // Background messages (bounded)
            for _ in 0..MAX_BG_MESSAGES {
                let Ok(msg) = msg_rx.try_recv() else { break };
                for cmd in update(&mut model, msg) {
                    if execute_command(cmd, &remote, &msg_tx, &mut ticker) {
                        shutdown.store(true, Ordering::Relaxed);
                        ticker.stop();
                        return Ok(());
                    }
                }
            }

            if model.dirty {
                send_state(&state_tx, &model);
                model.dirty = false;
            }

            tokio::time::sleep(Duration::from_micros(500)).await;
        }

        ticker.stop();
        Ok(())
    }
}

/// Carry out one command. Returns true when the app should quit.
pub fn execute_command(
    cmd: Command,
    remote: &Arc<Remote>,
    msg_tx: &mpsc::UnboundedSender<Message>,
    ticker: &mut TickerSlot,
) -> bool {
    match cmd {
        Command::RunRemote { ticket, request } => {
            tlog_debug!("Command::RunRemote ticket={} {}", ticket, request.label());
            RemoteTask::new(remote.clone(), msg_tx.clone(), ticket, request).spawn();
        }

        Command::StartMatrixTicker { generation } => {
            tlog_debug!("Command::StartMatrixTicker generation={}", generation);
            ticker.start(msg_tx.clone(), generation);
        }

        Command::StopMatrixTicker => {
            tlog_debug!("Command::StopMatrixTicker");
            ticker.stop();
        }

        Command::Quit => {
            tlog_debug!("Command::Quit");
            return true;
        }
    }

    false
}

fn send_state(state_tx: &Sender<RenderState>, model: &Model) {
    let _ = state_tx.try_send(model.snapshot());
}

/// Runs single lines without a terminal, for `termfolio exec`.
pub struct Headless {
    shell: Shell,
    theme: ThemeStore,
    config: Config,
    remote: Remote,
}

impl Headless {
    pub fn new(
        config: Config,
        prefs: Box<dyn PreferenceStore>,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Result<Self> {
        let theme = restore_theme(prefs, &config, None);
        let remote = Remote::new(&config, clipboard)?;
        Ok(Self {
            shell: Shell::new(Registry::builtin()),
            theme,
            config,
            remote,
        })
    }

    /// Execute one line and return the blocks it produced. Remote requests
    /// are awaited; a modal is returned as its body under a title heading.
    pub async fn run(&mut self, line: &str) -> Vec<Block> {
        let before = self.shell.log().len();
        let effect = self.shell.execute(line, &mut self.theme, &self.config);

        match effect {
            Effect::OpenModal { title, body } => {
                let mut block =
                    Block::new().with(Line::styled(format!("[{title}]"), Class::Heading));
                block.lines.extend(body.lines);
                return vec![block];
            }
            Effect::StartMatrix => {
                return vec![Block::error("cmatrix needs an interactive terminal.")];
            }
            Effect::Remote { ticket, request } => {
                let block = self.remote.run(&request).await;
                self.shell.complete(ticket, block);
            }
            Effect::None | Effect::Quit => {}
        }

        let entries = self.shell.log().entries();
        let start = before.min(entries.len());
        let blocks: Vec<Block> = entries[start..]
            .iter()
            .filter_map(|entry| match entry {
                Entry::Output(block) => Some(block.clone()),
                Entry::Prompt(_) => None,
            })
            .collect();
        tlog!("Headless run '{}' produced {} blocks", line.trim(), blocks.len());
        blocks
    }
}
