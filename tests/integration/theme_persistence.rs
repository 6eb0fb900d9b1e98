//! Theme persistence tests: choices survive a restart through the
//! preferences file, and bad stored values fall back cleanly.

use std::fs;

use ratatui::style::Color;

use termfolio::config::Config;
use termfolio::prefs::{FilePreferences, PreferenceStore, THEME_KEY};
use termfolio::tea::Model;
use termfolio::theme::{StyleVar, ThemeStore, THEMES};

use super::fixtures::Harness;

fn restart(path: &std::path::Path) -> ThemeStore {
    ThemeStore::restore(Box::new(FilePreferences::open(path)), None)
}

#[test]
fn test_theme_choice_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let theme = restart(&path);
    assert_eq!(theme.active_name(), "default");

    let mut model = Model::new(theme, Config::default(), (80, 24));
    let effect = model
        .shell
        .execute("theme nord", &mut model.theme, &model.config);
    assert_eq!(effect, termfolio::shell::Effect::None);
    drop(model);

    let restored = restart(&path);
    assert_eq!(restored.active_name(), "nord");
    assert_eq!(
        restored.sheet().get(StyleVar::Background),
        Color::Rgb(0x2e, 0x34, 0x40)
    );
}

#[test]
fn test_unknown_theme_does_not_touch_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut h = Harness::new(Config::default());
    h.model.theme = restart(&path);
    h.type_line("theme dracula");
    h.type_line("theme neon");

    assert_eq!(h.model.theme.active_name(), "dracula");
    assert_eq!(
        FilePreferences::open(&path).get(THEME_KEY).as_deref(),
        Some("dracula")
    );
}

#[test]
fn test_corrupt_preferences_fall_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(&path, "{not json").unwrap();

    let theme = restart(&path);
    assert_eq!(theme.active_name(), "default");
}

#[test]
fn test_stale_stored_theme_falls_back_to_configured_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(&path, r#"{"theme":"removed-theme"}"#).unwrap();

    let theme = ThemeStore::restore(Box::new(FilePreferences::open(&path)), Some("gruvbox"));
    assert_eq!(theme.active_name(), "gruvbox");
}

#[test]
fn test_every_theme_applies_every_variable() {
    let mut h = Harness::new(Config::default());
    for theme in THEMES.iter() {
        h.type_line(&format!("theme {}", theme.name));
        assert_eq!(h.model.theme.active_name(), theme.name);
        for var in StyleVar::ALL {
            assert_eq!(
                h.model.theme.sheet().get(var),
                theme.palette.color(var),
                "{} {:?}",
                theme.name,
                var
            );
        }
    }
}

#[test]
fn test_snapshot_carries_active_styles() {
    let mut h = Harness::new(Config::default());
    h.type_line("theme matrix");
    let state = h.model.snapshot();
    assert_eq!(state.theme_name, "matrix");
    assert_eq!(state.styles.get(StyleVar::Background), Color::Rgb(0, 0, 0));
}
