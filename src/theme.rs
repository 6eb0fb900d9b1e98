//! Theme catalog and the runtime theme store.
//!
//! A theme maps every [`StyleVar`] to a color. Applying a theme writes all of
//! its variables into the [`StyleSheet`] the UI draws with and persists the
//! theme name through a [`PreferenceStore`].

use std::collections::HashMap;

use ratatui::style::Color;

use crate::prefs::{PreferenceStore, THEME_KEY};
use crate::{tlog, tlog_debug, tlog_warn};

/// Theme applied when nothing valid is stored.
pub const DEFAULT_THEME: &str = "default";

/// Style variables every theme must define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleVar {
    Background,
    Foreground,
    Muted,
    Accent,
    Heading,
    Link,
    Error,
    Success,
    PromptUser,
    PromptDir,
    Border,
}

impl StyleVar {
    pub const ALL: [StyleVar; 11] = [
        StyleVar::Background,
        StyleVar::Foreground,
        StyleVar::Muted,
        StyleVar::Accent,
        StyleVar::Heading,
        StyleVar::Link,
        StyleVar::Error,
        StyleVar::Success,
        StyleVar::PromptUser,
        StyleVar::PromptDir,
        StyleVar::Border,
    ];
}

/// Hex colors (`#rrggbb`) for one theme. The struct shape guarantees that a
/// theme cannot omit a variable.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub heading: &'static str,
    pub link: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    pub prompt_user: &'static str,
    pub prompt_dir: &'static str,
    pub border: &'static str,
}

impl Palette {
    pub fn hex(&self, var: StyleVar) -> &'static str {
        match var {
            StyleVar::Background => self.background,
            StyleVar::Foreground => self.foreground,
            StyleVar::Muted => self.muted,
            StyleVar::Accent => self.accent,
            StyleVar::Heading => self.heading,
            StyleVar::Link => self.link,
            StyleVar::Error => self.error,
            StyleVar::Success => self.success,
            StyleVar::PromptUser => self.prompt_user,
            StyleVar::PromptDir => self.prompt_dir,
            StyleVar::Border => self.border,
        }
    }

    pub fn color(&self, var: StyleVar) -> Color {
        parse_hex(self.hex(var)).unwrap_or(Color::Reset)
    }
}

#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub palette: Palette,
}

pub static THEMES: [Theme; 9] = [
    Theme {
        name: "default",
        palette: Palette {
            background: "#0d1117",
            foreground: "#c9d1d9",
            muted: "#6e7681",
            accent: "#facc15",
            heading: "#facc15",
            link: "#58a6ff",
            error: "#ef4444",
            success: "#22c55e",
            prompt_user: "#f472b6",
            prompt_dir: "#60a5fa",
            border: "#30363d",
        },
    },
    Theme {
        name: "dracula",
        palette: Palette {
            background: "#282a36",
            foreground: "#f8f8f2",
            muted: "#6272a4",
            accent: "#f1fa8c",
            heading: "#bd93f9",
            link: "#8be9fd",
            error: "#ff5555",
            success: "#50fa7b",
            prompt_user: "#ff79c6",
            prompt_dir: "#bd93f9",
            border: "#44475a",
        },
    },
    Theme {
        name: "nord",
        palette: Palette {
            background: "#2e3440",
            foreground: "#d8dee9",
            muted: "#4c566a",
            accent: "#ebcb8b",
            heading: "#88c0d0",
            link: "#81a1c1",
            error: "#bf616a",
            success: "#a3be8c",
            prompt_user: "#b48ead",
            prompt_dir: "#88c0d0",
            border: "#3b4252",
        },
    },
    Theme {
        name: "gruvbox",
        palette: Palette {
            background: "#282828",
            foreground: "#ebdbb2",
            muted: "#928374",
            accent: "#fabd2f",
            heading: "#fe8019",
            link: "#83a598",
            error: "#fb4934",
            success: "#b8bb26",
            prompt_user: "#d3869b",
            prompt_dir: "#8ec07c",
            border: "#3c3836",
        },
    },
    Theme {
        name: "monokai",
        palette: Palette {
            background: "#272822",
            foreground: "#f8f8f2",
            muted: "#75715e",
            accent: "#e6db74",
            heading: "#fd971f",
            link: "#66d9ef",
            error: "#f92672",
            success: "#a6e22e",
            prompt_user: "#f92672",
            prompt_dir: "#66d9ef",
            border: "#3e3d32",
        },
    },
    Theme {
        name: "solarized",
        palette: Palette {
            background: "#002b36",
            foreground: "#839496",
            muted: "#586e75",
            accent: "#b58900",
            heading: "#cb4b16",
            link: "#268bd2",
            error: "#dc322f",
            success: "#859900",
            prompt_user: "#d33682",
            prompt_dir: "#2aa198",
            border: "#073642",
        },
    },
    Theme {
        name: "tokyonight",
        palette: Palette {
            background: "#1a1b26",
            foreground: "#c0caf5",
            muted: "#565f89",
            accent: "#e0af68",
            heading: "#bb9af7",
            link: "#7aa2f7",
            error: "#f7768e",
            success: "#9ece6a",
            prompt_user: "#bb9af7",
            prompt_dir: "#7dcfff",
            border: "#292e42",
        },
    },
    Theme {
        name: "catppuccin",
        palette: Palette {
            background: "#1e1e2e",
            foreground: "#cdd6f4",
            muted: "#6c7086",
            accent: "#f9e2af",
            heading: "#cba6f7",
            link: "#89b4fa",
            error: "#f38ba8",
            success: "#a6e3a1",
            prompt_user: "#f5c2e7",
            prompt_dir: "#89dceb",
            border: "#313244",
        },
    },
    Theme {
        name: "matrix",
        palette: Palette {
            background: "#000000",
            foreground: "#00ff41",
            muted: "#008f11",
            accent: "#00ff41",
            heading: "#39ff14",
            link: "#00ff41",
            error: "#ff3333",
            success: "#00ff41",
            prompt_user: "#39ff14",
            prompt_dir: "#008f11",
            border: "#003b00",
        },
    },
];

/// Look up a theme by exact name.
pub fn find(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|t| t.name)
}

/// Parse `#rrggbb` into an RGB color.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Resolved style variables the UI draws with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    vars: HashMap<StyleVar, Color>,
}

impl StyleSheet {
    pub fn set(&mut self, var: StyleVar, color: Color) {
        self.vars.insert(var, color);
    }

    pub fn get(&self, var: StyleVar) -> Color {
        self.vars.get(&var).copied().unwrap_or(Color::Reset)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Owns the active theme and its persisted name.
pub struct ThemeStore {
    active: &'static Theme,
    sheet: StyleSheet,
    prefs: Box<dyn PreferenceStore>,
}

impl ThemeStore {
    /// Startup path: apply the persisted theme, or the fallback when the
    /// stored value is absent or unknown. Never fails.
    ///
    /// `fallback` is consulted only if it names a catalog theme; otherwise
    /// [`DEFAULT_THEME`] is used.
    pub fn restore(prefs: Box<dyn PreferenceStore>, fallback: Option<&str>) -> Self {
        let stored = prefs.get(THEME_KEY);
        let mut store = Self {
            active: &THEMES[0],
            sheet: StyleSheet::default(),
            prefs,
        };

        let name = match stored.as_deref().and_then(find) {
            Some(theme) => theme.name,
            None => {
                if let Some(bad) = stored.as_deref() {
                    tlog_warn!("Stored theme '{}' is unknown, falling back", bad);
                }
                fallback.and_then(find).map_or(DEFAULT_THEME, |t| t.name)
            }
        };
        store.apply(name);
        tlog_debug!("ThemeStore::restore active={}", store.active.name);
        store
    }

    /// Apply a catalog theme by name. Unknown names change nothing and return false.
    pub fn apply(&mut self, name: &str) -> bool {
        let Some(theme) = find(name) else {
            tlog_debug!("ThemeStore::apply unknown theme '{}'", name);
            return false;
        };

        for var in StyleVar::ALL {
            self.sheet.set(var, theme.palette.color(var));
        }
        self.active = theme;

        if let Err(e) = self.prefs.set(THEME_KEY, theme.name) {
            tlog_warn!("Failed to persist theme '{}': {}", theme.name, e);
        }
        tlog!("Theme applied: {}", theme.name);
        true
    }

    pub fn active_name(&self) -> &'static str {
        self.active.name
    }

    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    pub fn prefs(&self) -> &dyn PreferenceStore {
        self.prefs.as_ref()
    }
}
