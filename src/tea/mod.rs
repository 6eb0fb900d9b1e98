//! The Elm Architecture (TEA) implementation for the termfolio TUI.
//!
//! - `Model`: application state (shell, theme, modal, matrix rain, input field)
//! - `Message`: inputs (keys, resizes, remote completions, matrix ticks)
//! - `Command`: side effects for the runtime (spawn remote work, drive the ticker)
//! - `update`: applies a message to the model and returns commands

pub mod command;
pub mod message;
pub mod model;
pub mod update;

pub use command::Command;
pub use message::Message;
pub use model::{InteractionMode, Modal, Model, SuspendReason};
pub use update::update;
