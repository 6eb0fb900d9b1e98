//! Pure update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::shell::Effect;
use crate::{tlog, tlog_debug};

use super::command::Command;
use super::message::Message;
use super::model::{InteractionMode, Modal, Model, SuspendReason};

/// Lines moved by PageUp/PageDown.
const PAGE_STEP: u16 = 10;

/// Pure update function: Model + Message → Commands
///
/// All I/O (remote requests, the matrix ticker, quitting) happens via the
/// returned Commands.
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return cmds;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                cmds.push(Command::Quit);
                return cmds;
            }
            model.dirty = true;
            match model.mode() {
                InteractionMode::Normal => update_normal_mode(model, key, &mut cmds),
                InteractionMode::Suspended(SuspendReason::Modal) => update_modal_mode(model, key),
                InteractionMode::Suspended(SuspendReason::Matrix) => {
                    update_matrix_mode(model, key, &mut cmds)
                }
            }
        }

        Message::Resize(width, height) => {
            model.viewport = (width, height);
            if model.matrix.is_running() {
                model.matrix.resize(width, height);
            }
            model.dirty = true;
        }

        Message::RemoteFinished { ticket, block } => {
            if model.shell.complete(ticket, block) {
                model.log_scroll = 0;
                model.dirty = true;
            }
        }

        Message::MatrixTick(generation) => {
            if model.matrix.tick(generation, &mut model.rng) {
                model.dirty = true;
            }
        }
    }

    cmds
}

fn update_normal_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    match key.code {
        KeyCode::Enter => submit(model, cmds),

        // Ctrl/Alt chords are not text.
        KeyCode::Char(_)
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}

        KeyCode::Char(c) => {
            model.input_buffer.push(c);
            model.recall = None;
        }

        KeyCode::Backspace => {
            model.input_buffer.pop();
        }

        KeyCode::Up => {
            let history = model.shell.history();
            if history.is_empty() {
                return;
            }
            let index = match model.recall {
                Some(i) => i.saturating_sub(1),
                None => history.len() - 1,
            };
            if let Some(line) = history.get(index) {
                model.input_buffer = line.to_string();
                model.recall = Some(index);
            }
        }

        KeyCode::Down => {
            let Some(i) = model.recall else {
                return;
            };
            match model.shell.history().get(i + 1) {
                Some(line) => {
                    model.input_buffer = line.to_string();
                    model.recall = Some(i + 1);
                }
                None => {
                    model.input_buffer.clear();
                    model.recall = None;
                }
            }
        }

        KeyCode::PageUp => {
            model.log_scroll = model.log_scroll.saturating_add(PAGE_STEP);
        }

        KeyCode::PageDown => {
            model.log_scroll = model.log_scroll.saturating_sub(PAGE_STEP);
        }

        _ => {}
    }
}

fn submit(model: &mut Model, cmds: &mut Vec<Command>) {
    let line = std::mem::take(&mut model.input_buffer);
    model.recall = None;
    if line.trim().is_empty() {
        return;
    }
    model.log_scroll = 0;

    let effect = model
        .shell
        .execute(&line, &mut model.theme, &model.config);
    tlog_debug!("update::submit effect={:?}", effect);

    match effect {
        Effect::None => {}
        Effect::OpenModal { title, body } => {
            model.modal = Some(Modal::new(title, body));
        }
        Effect::StartMatrix => {
            let (width, height) = model.viewport;
            let generation = model.matrix.start(width, height);
            tlog!("Matrix started (generation {})", generation);
            cmds.push(Command::StartMatrixTicker { generation });
        }
        Effect::Remote { ticket, request } => {
            cmds.push(Command::RunRemote { ticket, request });
        }
        Effect::Quit => cmds.push(Command::Quit),
    }
}

fn update_modal_mode(model: &mut Model, key: KeyEvent) {
    let Some(modal) = model.modal.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            model.modal = None;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            modal.scroll = modal.scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            modal.scroll = modal.scroll.saturating_sub(1);
        }
        KeyCode::PageDown => {
            modal.scroll = modal.scroll.saturating_add(PAGE_STEP);
        }
        KeyCode::PageUp => {
            modal.scroll = modal.scroll.saturating_sub(PAGE_STEP);
        }
        _ => {}
    }
}

fn update_matrix_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    if key.code == KeyCode::Esc && model.matrix.stop() {
        tlog!("Matrix stopped after {} frames", model.matrix.frames());
        cmds.push(Command::StopMatrixTicker);
    }
}
