//! Matrix mode tests with a live ticker: start, animate, stop, restart.

use std::time::Duration;

use crossterm::event::KeyCode;

use termfolio::config::Config;
use termfolio::tea::{InteractionMode, Message, SuspendReason};

use super::fixtures::Harness;

/// Apply every queued message without waiting.
fn drain(h: &mut Harness) {
    while let Ok(msg) = h.msg_rx.try_recv() {
        h.send(msg);
    }
}

#[tokio::test]
async fn test_ticker_animates_until_escape() {
    let mut h = Harness::new(Config::default());
    h.type_line("cmatrix");
    assert!(h.ticker.is_running());
    assert_eq!(
        h.model.mode(),
        InteractionMode::Suspended(SuspendReason::Matrix)
    );

    for _ in 0..3 {
        h.pump_one().await;
    }
    assert!(h.model.matrix.frames() >= 3);

    h.key(KeyCode::Esc);
    assert!(!h.ticker.is_running());
    assert!(!h.model.matrix.is_running());
    assert!(h.model.input_enabled());

    tokio::time::sleep(Duration::from_millis(100)).await;
    drain(&mut h);
    let frames = h.model.matrix.frames();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.msg_rx.try_recv().is_err());
    assert_eq!(h.model.matrix.frames(), frames);
}

#[tokio::test]
async fn test_typing_is_ignored_while_raining() {
    let mut h = Harness::new(Config::default());
    h.type_line("cmatrix");
    let history = h.model.shell.history().len();

    h.type_line("whoami");
    assert!(h.model.input_buffer.is_empty());
    assert_eq!(h.model.shell.history().len(), history);
    assert!(h.model.matrix.is_running());

    h.key(KeyCode::Esc);
}

#[tokio::test]
async fn test_restart_keeps_single_ticker() {
    let mut h = Harness::new(Config::default());
    h.type_line("cmatrix");
    let first = h.model.matrix.generation();
    h.key(KeyCode::Esc);

    h.type_line("cmatrix");
    let second = h.model.matrix.generation();
    assert!(second > first);
    assert_eq!(h.ticker.generation(), Some(second));

    tokio::time::sleep(Duration::from_millis(100)).await;
    while let Ok(msg) = h.msg_rx.try_recv() {
        if let Message::MatrixTick(generation) = msg {
            assert_eq!(generation, second);
        }
    }
    h.key(KeyCode::Esc);
}

#[tokio::test]
async fn test_resize_while_raining() {
    let mut h = Harness::new(Config::default());
    h.type_line("cmatrix");
    h.send(Message::Resize(30, 12));
    h.pump_one().await;

    let frame = h.model.snapshot().matrix.expect("matrix frame");
    assert_eq!((frame.width, frame.height), (30, 12));
    h.key(KeyCode::Esc);
}
