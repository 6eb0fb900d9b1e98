//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is application state only - no channels, no task handles.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::commands::Registry;
use crate::config::Config;
use crate::matrix::MatrixRain;
use crate::output::Block;
use crate::render::{next_version, RenderState};
use crate::shell::Shell;
use crate::theme::ThemeStore;

/// Why input is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspendReason {
    Modal,
    Matrix,
}

/// Whether the command field accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Normal,
    Suspended(SuspendReason),
}

/// Blocking overlay for long-form content.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub title: String,
    pub body: Block,
    pub scroll: u16,
}

impl Modal {
    pub fn new(title: String, body: Block) -> Self {
        Self {
            title,
            body,
            scroll: 0,
        }
    }
}

pub struct Model {
    // Core state
    pub shell: Shell,
    pub theme: ThemeStore,
    pub modal: Option<Modal>,
    pub matrix: MatrixRain,

    // Input state
    pub input_buffer: String,
    /// Index into history while recalling with Up/Down.
    pub recall: Option<usize>,
    /// Lines scrolled up from the bottom of the log.
    pub log_scroll: u16,

    /// Terminal size, used to size the matrix rain.
    pub viewport: (u16, u16),

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    pub rng: StdRng,

    // Config (immutable after init)
    pub config: Config,
}

impl Model {
    pub fn new(theme: ThemeStore, config: Config, viewport: (u16, u16)) -> Self {
        Self {
            shell: Shell::new(Registry::builtin()),
            theme,
            modal: None,
            matrix: MatrixRain::new(),
            input_buffer: String::new(),
            recall: None,
            log_scroll: 0,
            viewport,
            dirty: true,
            rng: StdRng::from_entropy(),
            config,
        }
    }

    /// Derived from modal and matrix state, so it can never disagree with them.
    pub fn mode(&self) -> InteractionMode {
        if self.matrix.is_running() {
            InteractionMode::Suspended(SuspendReason::Matrix)
        } else if self.modal.is_some() {
            InteractionMode::Suspended(SuspendReason::Modal)
        } else {
            InteractionMode::Normal
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.mode() == InteractionMode::Normal
    }

    /// Create an immutable snapshot for the render thread.
    pub fn snapshot(&self) -> RenderState {
        let matrix = self.matrix.is_running().then(|| self.matrix.frame());
        RenderState {
            version: next_version(),
            log: self.shell.log().entries().to_vec(),
            log_scroll: self.log_scroll,
            input_buffer: self.input_buffer.clone(),
            mode: self.mode(),
            modal: self.modal.clone(),
            matrix,
            styles: self.theme.sheet().clone(),
            theme_name: self.theme.active_name(),
        }
    }
}
