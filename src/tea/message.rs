//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages come from the terminal (keys, resizes) and from background
//! tasks (remote completions, matrix ticks).

use crossterm::event::KeyEvent;

use crate::output::Block;

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    // Keyboard/terminal events
    Key(KeyEvent),
    Resize(u16, u16),

    /// A remote action finished; `block` is its rendered result or error line.
    RemoteFinished { ticket: u64, block: Block },

    /// Redraw tick from the matrix ticker of the given generation.
    MatrixTick(u64),
}
