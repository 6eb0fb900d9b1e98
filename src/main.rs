use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;

use termfolio::app::{Headless, LogicThread};
use termfolio::config::Config;
use termfolio::prefs::MemoryPreferences;
use termfolio::remote::SystemClipboard;
use termfolio::render::RenderState;
use termfolio::{tlog, ui, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps

/// Termfolio - an interactive portfolio that behaves like a shell
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    TERMFOLIO_DEBUG=1     Enable debug logging (alternative to --debug)"
)]
pub struct Cli {
    /// Enable debug logging (writes to ~/.termfolio/termfolio.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Theme to apply at startup, as if typed with `theme <name>`
    #[arg(short = 't', long)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run one command line without the TUI and print its output
    Exec {
        /// The line to run, e.g. "crypto bitcoin"
        line: String,
    },

    /// Write ~/.termfolio/termfolio.toml with every setting filled in
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    termfolio::log::init(cli.debug);

    match cli.command {
        Some(Command::Exec { line }) => return run_exec(&line),
        Some(Command::Init { force }) => return run_init(force),
        None => {}
    }

    if termfolio::log::is_debug() {
        tlog!("Termfolio starting (debug mode enabled)");
    } else {
        tlog!("Termfolio starting");
    }

    let config = Config::load()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let theme = cli.theme.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, theme, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle.join();
    restore_terminal(&mut terminal)?;
    result?;
    match logic_result {
        Ok(inner) => inner,
        Err(_) => {
            eprintln!("termfolio: logic thread panicked");
            Ok(())
        }
    }
}

/// Run one line headless. Output goes to stdout as plain text.
fn run_exec(line: &str) -> Result<()> {
    let config = Config::load()?;
    let mut app = Headless::new(
        config,
        Box::new(MemoryPreferences::new()),
        Arc::new(SystemClipboard),
    )?;
    let blocks = Runtime::new()?.block_on(app.run(line));
    for block in blocks {
        println!("{}", block.to_plain_text());
    }
    Ok(())
}

fn run_init(force: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        println!(
            "{} already exists. Use 'termfolio init --force' to overwrite it.",
            path.display()
        );
        return Ok(());
    }
    Config::filled().save_to(&path)?;
    println!("Wrote {}", path.display());
    tlog!("Config written to {}", path.display());
    Ok(())
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
