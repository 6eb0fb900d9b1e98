pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod files;
pub mod log;
pub mod matrix;
pub mod output;
pub mod prefs;
pub mod remote;
pub mod shell;
pub mod theme;
pub mod util;

// Decoupled game loop architecture
pub mod actors;
pub mod app;
pub mod render;
pub mod tea;
pub mod ui;

pub use error::{Error, Result};
