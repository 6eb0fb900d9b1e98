//! Matrix ticker: drives the rain animation at a fixed interval.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::matrix::TICK_INTERVAL;
use crate::tea::Message;
use crate::{tlog_debug, tlog_trace};

use super::ActorHandle;

/// Actor that sends `Message::MatrixTick(generation)` until cancelled.
pub struct MatrixTicker {
    msg_tx: mpsc::UnboundedSender<Message>,
    generation: u64,
    interval: Duration,
}

impl MatrixTicker {
    pub fn new(msg_tx: mpsc::UnboundedSender<Message>, generation: u64) -> Self {
        Self {
            msg_tx,
            generation,
            interval: TICK_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn spawn(self) -> ActorHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        tlog_debug!("MatrixTicker::spawn generation={}", self.generation);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel_clone.cancelled() => {
                        tlog_debug!("MatrixTicker cancelled generation={}", self.generation);
                        break;
                    }
                    _ = interval.tick() => {
                        if self.msg_tx.send(Message::MatrixTick(self.generation)).is_err() {
                            tlog_debug!("MatrixTicker: message channel closed");
                            break;
                        }
                        tlog_trace!("MatrixTicker tick generation={}", self.generation);
                    }
                }
            }
        });

        ActorHandle::new(cancel)
    }
}

/// Holds at most one running ticker. Starting a new one cancels the old.
#[derive(Default)]
pub struct TickerSlot {
    current: Option<(u64, ActorHandle)>,
}

impl TickerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, msg_tx: mpsc::UnboundedSender<Message>, generation: u64) {
        self.stop();
        let handle = MatrixTicker::new(msg_tx, generation).spawn();
        self.current = Some((generation, handle));
    }

    /// Cancel the running ticker, if any. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        match self.current.take() {
            Some((_, handle)) => {
                handle.shutdown();
                true
            }
            None => false,
        }
    }

    /// Generation of the running ticker.
    pub fn generation(&self) -> Option<u64> {
        self.current.as_ref().map(|(generation, _)| *generation)
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }
}
