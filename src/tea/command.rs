//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - side effects executed by
//! the runtime.

use crate::remote::RemoteRequest;

#[derive(Debug, PartialEq)]
pub enum Command {
    /// Spawn a remote task; it answers with `Message::RemoteFinished`.
    RunRemote {
        ticket: u64,
        request: RemoteRequest,
    },

    /// Start the matrix ticker, replacing any running one.
    StartMatrixTicker {
        generation: u64,
    },

    /// Cancel the matrix ticker.
    StopMatrixTicker,

    // App lifecycle
    Quit,
}
