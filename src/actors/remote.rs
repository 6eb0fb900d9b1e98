//! One-shot task that runs a remote request and reports back.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::remote::{Remote, RemoteRequest};
use crate::tea::Message;
use crate::tlog_debug;

/// A remote request bound to the ticket its result must carry.
pub struct RemoteTask {
    remote: Arc<Remote>,
    msg_tx: mpsc::UnboundedSender<Message>,
    ticket: u64,
    request: RemoteRequest,
}

impl RemoteTask {
    pub fn new(
        remote: Arc<Remote>,
        msg_tx: mpsc::UnboundedSender<Message>,
        ticket: u64,
        request: RemoteRequest,
    ) -> Self {
        Self {
            remote,
            msg_tx,
            ticket,
            request,
        }
    }

    /// Run in the background. Tasks are independent, so results arrive in
    /// completion order.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            tlog_debug!(
                "RemoteTask start ticket={} request={}",
                self.ticket,
                self.request.label()
            );
            let block = self.remote.run(&self.request).await;
            if self
                .msg_tx
                .send(Message::RemoteFinished {
                    ticket: self.ticket,
                    block,
                })
                .is_err()
            {
                tlog_debug!("RemoteTask: message channel closed");
            }
        })
    }
}
