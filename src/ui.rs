//! Terminal UI rendering.
//!
//! Layout: the scroll log fills the screen and the live prompt follows the
//! last entry, like a real terminal. One status line at the bottom shows the
//! active theme and key hints. The modal and the matrix rain draw over it.
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state. This enables the decoupled game loop.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::content::{PROMPT_DIR, PROMPT_USER};
use crate::matrix::MatrixFrame;
use crate::output::{self, Class};
use crate::render::RenderState;
use crate::shell::Entry;
use crate::tea::{InteractionMode, Modal, SuspendReason};
use crate::theme::{StyleSheet, StyleVar};

// Modal size as a percentage of the screen
const MODAL_WIDTH_PCT: u16 = 80;
const MODAL_HEIGHT_PCT: u16 = 80;

/// Color of the leading glyph of each rain column.
const MATRIX_HEAD: Color = Color::Rgb(0xd0, 0xff, 0xd0);

pub fn draw(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    let background = Style::default()
        .bg(state.styles.get(StyleVar::Background))
        .fg(state.styles.get(StyleVar::Foreground));
    frame.render_widget(Block::default().style(background), area);

    if let Some(ref matrix) = state.matrix {
        render_matrix(frame, matrix, area);
        return;
    }

    render_main_layout(frame, state);

    if let Some(ref modal) = state.modal {
        render_modal(frame, modal, &state.styles, area);
    }
}

fn render_main_layout(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    if area.height < 2 {
        render_log(frame, state, area);
        return;
    }

    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);
    render_log(frame, state, chunks[0]);
    render_statusbar(frame, state, chunks[1]);
}

/// Style for an output class under the active theme.
pub fn class_style(styles: &StyleSheet, class: Class) -> Style {
    let fg = |var| Style::default().fg(styles.get(var));
    match class {
        Class::Plain => fg(StyleVar::Foreground),
        Class::Strong => fg(StyleVar::Foreground).add_modifier(Modifier::BOLD),
        Class::Italic => fg(StyleVar::Foreground).add_modifier(Modifier::ITALIC),
        Class::Accent => fg(StyleVar::Accent),
        Class::Heading => fg(StyleVar::Heading).add_modifier(Modifier::BOLD),
        Class::Muted => fg(StyleVar::Muted),
        Class::Link => fg(StyleVar::Link).add_modifier(Modifier::UNDERLINED),
        Class::Error => fg(StyleVar::Error),
        Class::Success => fg(StyleVar::Success),
        Class::PromptUser => fg(StyleVar::PromptUser).add_modifier(Modifier::BOLD),
        Class::PromptDir => fg(StyleVar::PromptDir),
    }
}

fn styled_line(styles: &StyleSheet, line: &output::Line) -> Line<'static> {
    Line::from(
        line.spans
            .iter()
            .map(|span| Span::styled(span.text.clone(), class_style(styles, span.class)))
            .collect::<Vec<_>>(),
    )
}

/// `guest@portfolio:~$ ` as styled spans.
fn prompt_spans(styles: &StyleSheet) -> Vec<Span<'static>> {
    vec![
        Span::styled(PROMPT_USER, class_style(styles, Class::PromptUser)),
        Span::styled(":", class_style(styles, Class::Plain)),
        Span::styled(PROMPT_DIR, class_style(styles, Class::PromptDir)),
        Span::styled("$ ", class_style(styles, Class::Plain)),
    ]
}

/// Split a line into rows of at most `width` display cells, keeping span styles.
pub fn wrap_line(line: Line<'static>, width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    if width == 0 || line.width() <= width {
        return vec![line];
    }

    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in line.spans {
        let mut chunk = String::new();
        for c in span.content.chars() {
            let cells = c.width().unwrap_or(0);
            // A glyph wider than the whole row still gets a row of its own.
            if used > 0 && used + cells > width {
                if !chunk.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut row)));
                used = 0;
            }
            chunk.push(c);
            used += cells;
        }
        if !chunk.is_empty() {
            row.push(Span::styled(chunk, span.style));
        }
    }
    if !row.is_empty() {
        rows.push(Line::from(row));
    }
    rows
}

/// Every visual row of the log, ending with the live prompt.
pub fn log_rows(state: &RenderState, width: u16) -> Vec<Line<'static>> {
    let styles = &state.styles;
    let mut lines: Vec<Line<'static>> = Vec::new();

    for entry in &state.log {
        match entry {
            Entry::Prompt(raw) => {
                let mut spans = prompt_spans(styles);
                spans.push(Span::styled(raw.clone(), class_style(styles, Class::Plain)));
                lines.push(Line::from(spans));
            }
            Entry::Output(block) => {
                lines.extend(block.lines.iter().map(|l| styled_line(styles, l)));
            }
        }
    }

    if state.mode == InteractionMode::Normal {
        let mut spans = prompt_spans(styles);
        spans.push(Span::styled(
            state.input_buffer.clone(),
            class_style(styles, Class::Plain),
        ));
        spans.push(Span::styled(
            "_",
            class_style(styles, Class::Plain).add_modifier(Modifier::SLOW_BLINK),
        ));
        lines.push(Line::from(spans));
    }

    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// Rows visible in a window of `height`, `scroll` rows up from the bottom.
pub fn visible_window(total: usize, height: usize, scroll: usize) -> (usize, usize) {
    let max_scroll = total.saturating_sub(height);
    let end = total - scroll.min(max_scroll);
    let start = end.saturating_sub(height);
    (start, end)
}

fn render_log(frame: &mut Frame, state: &RenderState, area: Rect) {
    let rows = log_rows(state, area.width);
    let (start, end) = visible_window(rows.len(), area.height as usize, state.log_scroll as usize);
    let lines: Vec<Line> = rows.into_iter().skip(start).take(end - start).collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    let styles = &state.styles;
    let muted = class_style(styles, Class::Muted);
    let accent = class_style(styles, Class::Accent);

    let hints = match state.mode {
        InteractionMode::Normal => "Enter run • ↑↓ history • PgUp/PgDn scroll • Ctrl+C quit",
        InteractionMode::Suspended(SuspendReason::Modal) => "Esc close • ↑↓ scroll",
        InteractionMode::Suspended(SuspendReason::Matrix) => "Esc exit",
    };

    let line = Line::from(vec![
        Span::styled("theme: ", muted),
        Span::styled(state.theme_name, accent),
        Span::styled(" │ ", muted),
        Span::styled(hints, muted),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Rect of `pct_x` by `pct_y` percent centered in `area`.
pub fn centered_rect(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let width = (area.width as u32 * pct_x as u32 / 100) as u16;
    let height = (area.height as u32 * pct_y as u32 / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_modal(frame: &mut Frame, modal: &Modal, styles: &StyleSheet, area: Rect) {
    let modal_area = centered_rect(area, MODAL_WIDTH_PCT, MODAL_HEIGHT_PCT);
    frame.render_widget(Clear, modal_area);

    let border = Style::default()
        .fg(styles.get(StyleVar::Border))
        .bg(styles.get(StyleVar::Background));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(Style::default().bg(styles.get(StyleVar::Background)))
        .title(Span::styled(
            format!("[{}]", modal.title),
            class_style(styles, Class::Heading),
        ))
        .title_bottom(Line::from(Span::styled(
            " Esc to close ",
            class_style(styles, Class::Muted),
        )));

    let lines: Vec<Line> = modal
        .body
        .lines
        .iter()
        .map(|l| styled_line(styles, l))
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((modal.scroll, 0));
    frame.render_widget(paragraph, modal_area);
}

fn render_matrix(frame: &mut Frame, matrix: &MatrixFrame, area: Rect) {
    let buf = frame.buffer_mut();
    let width = matrix.width.min(area.width);
    let height = matrix.height.min(area.height);

    for y in 0..height {
        for x in 0..width {
            let Some(cell) = matrix.cell(x, y) else {
                continue;
            };
            if cell.intensity == 0 {
                continue;
            }
            let color = if cell.intensity == u8::MAX {
                MATRIX_HEAD
            } else {
                Color::Rgb(0, cell.intensity, 0)
            };
            buf[(area.x + x, area.y + y)]
                .set_char(cell.glyph)
                .set_fg(color)
                .set_bg(Color::Black);
        }
    }
}
