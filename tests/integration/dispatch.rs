//! Dispatch tests: registry-driven help, history, not-found handling, and
//! agreement between `ls` and `cat`.

use crossterm::event::KeyCode;

use termfolio::commands::{CommandSpec, Invocation, Outcome, Registry};
use termfolio::config::Config;
use termfolio::output::{Block, Class};
use termfolio::prefs::MemoryPreferences;
use termfolio::shell::{Effect, Entry, Shell};
use termfolio::tea::InteractionMode;
use termfolio::theme::ThemeStore;

use super::fixtures::{closed_endpoint, config_for, outputs, Harness};

fn wave(_: &mut Invocation<'_>) -> Outcome {
    Outcome::Print(Block::plain("o/"))
}

fn theme_store() -> ThemeStore {
    ThemeStore::restore(Box::new(MemoryPreferences::new()), None)
}

// ═══════════════════════════════════════════════════════════════════════════
// Registry Tests - help derives from the same registry dispatch uses
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_help_lists_registered_custom_command() {
    let mut registry = Registry::builtin();
    registry
        .register(CommandSpec {
            name: "wave",
            usage: "wave",
            description: "Wave hello.",
            action: wave,
        })
        .unwrap();

    let mut shell = Shell::new(registry);
    let mut theme = theme_store();
    let config = Config::default();

    shell.execute("help", &mut theme, &config);
    let help = match shell.log().last() {
        Some(Entry::Output(block)) => block.clone(),
        other => panic!("expected help output, got {other:?}"),
    };
    assert!(help.contains("wave"));
    assert!(help.contains("Wave hello."));

    shell.execute("WAVE", &mut theme, &config);
    assert!(matches!(
        shell.log().last(),
        Some(Entry::Output(b)) if b.to_plain_text() == "o/"
    ));
}

#[test]
fn test_help_mentions_every_builtin() {
    let mut h = Harness::new(Config::default());
    h.type_line("help");
    let help = h.last_output();
    for spec in Registry::builtin().iter() {
        assert!(help.contains(spec.name), "help is missing '{}'", spec.name);
    }
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut registry = Registry::builtin();
    let before = registry.len();
    let result = registry.register(CommandSpec {
        name: "help",
        usage: "help",
        description: "Shadow.",
        action: wave,
    });
    assert!(result.is_err());
    assert_eq!(registry.len(), before);
}

/// Every builtin run bare: remote ones fail against a closed port, suspending
/// ones are dismissed with Esc, and input always comes back.
#[tokio::test]
async fn test_every_builtin_runs_without_arguments() {
    let base = closed_endpoint().await;
    let mut h = Harness::new(config_for(&base));

    for spec in Registry::builtin().iter() {
        if spec.name == "exit" {
            continue;
        }
        let before = h.model.shell.log().len();
        assert!(!h.type_line(spec.name), "'{}' asked to quit", spec.name);
        h.settle().await;

        match h.model.mode() {
            InteractionMode::Suspended(_) => {
                h.key(KeyCode::Esc);
            }
            InteractionMode::Normal => {}
        }

        assert!(h.model.input_enabled(), "'{}' left input disabled", spec.name);
        assert!(!h.ticker.is_running(), "'{}' left a ticker running", spec.name);
        assert_eq!(h.model.shell.pending().count(), 0);
        if spec.name != "clear" {
            assert!(h.model.shell.log().len() > before);
        }
    }

    assert!(h.type_line("exit"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Execution Loop Tests - history, echo, not-found
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_history_shows_raw_lines_including_itself() {
    let mut h = Harness::new(Config::default());
    h.type_line("  whoami  ");
    h.type_line("Bogus arg");
    h.type_line("history");

    let text = h.last_output().to_plain_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["   1  whoami", "   2  Bogus arg", "   3  history"]
    );
}

#[test]
fn test_not_found_keeps_typed_case() {
    let mut h = Harness::new(Config::default());
    h.type_line("FooBar baz");
    let block = h.last_output();
    assert!(block.contains("Command not found: FooBar"));
    assert!(block.has_class(Class::Error));
    assert_eq!(block.lines.len(), 1);
}

#[test]
fn test_commands_are_case_insensitive() {
    let mut h = Harness::new(Config::default());
    h.type_line("WhoAmI");
    assert_eq!(h.last_output().to_plain_text(), "guest");
}

#[test]
fn test_clear_empties_log_then_banner_restores() {
    let mut h = Harness::new(Config::default());
    h.type_line("whoami");
    h.type_line("clear");
    assert!(h.model.shell.log().is_empty());

    h.type_line("banner");
    assert!(h.last_output().contains("Welcome"));
}

#[test]
fn test_exit_quits() {
    let mut h = Harness::new(Config::default());
    assert!(h.type_line("exit"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Pseudo-filesystem Tests - every listed name opens, nothing else does
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_every_listed_file_opens_in_modal() {
    let mut h = Harness::new(Config::default());
    h.type_line("ls");
    let listing = h.last_output().to_plain_text();
    let names: Vec<String> = listing.split_whitespace().map(str::to_string).collect();
    assert!(!names.is_empty());

    for name in names {
        h.type_line(&format!("cat {name}"));
        let modal = h.model.modal.clone().unwrap_or_else(|| panic!("{name} did not open"));
        assert_eq!(modal.title, name);
        assert!(!modal.body.is_empty());
        h.key(KeyCode::Esc);
        assert!(h.model.modal.is_none());
    }
}

#[test]
fn test_cat_unknown_file_is_single_error_line() {
    let mut h = Harness::new(Config::default());
    let before = outputs(&h.model).len();
    h.type_line("cat secrets.txt");
    assert!(h.model.modal.is_none());

    let blocks = outputs(&h.model);
    assert_eq!(blocks.len(), before + 1);
    assert_eq!(
        blocks[before].to_plain_text(),
        "cat: secrets.txt: No such file or directory"
    );
}

#[test]
fn test_modal_command_produces_open_effect() {
    let mut shell = Shell::new(Registry::builtin());
    let mut theme = theme_store();
    let effect = shell.execute("socials", &mut theme, &Config::default());
    match effect {
        Effect::OpenModal { title, body } => {
            assert_eq!(title, "socials");
            assert!(body.has_class(Class::Link));
        }
        other => panic!("expected modal, got {other:?}"),
    }
}
