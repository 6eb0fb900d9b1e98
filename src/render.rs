use std::sync::atomic::{AtomicU64, Ordering};

use crate::matrix::MatrixFrame;
use crate::shell::Entry;
use crate::tea::{InteractionMode, Modal};
use crate::theme::{StyleSheet, DEFAULT_THEME};

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub log: Vec<Entry>,
    /// Lines scrolled up from the bottom of the log.
    pub log_scroll: u16,
    pub input_buffer: String,
    pub mode: InteractionMode,
    pub modal: Option<Modal>,
    /// Present only while the rain is running.
    pub matrix: Option<MatrixFrame>,
    pub styles: StyleSheet,
    pub theme_name: &'static str,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            log: Vec::new(),
            log_scroll: 0,
            input_buffer: String::new(),
            mode: InteractionMode::Normal,
            modal: None,
            matrix: None,
            styles: StyleSheet::default(),
            theme_name: DEFAULT_THEME,
        }
    }
}
