//! Progress reporting for long-running generation workflows.
//!
//! Workflows push events into a [`ProgressReporter`]. The streaming HTTP
//! endpoints hand the receiving end to the client; the non-streaming ones use
//! [`ProgressReporter::silent`].

use serde_json::Value;
use tokio::sync::mpsc;

/// One progress event.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Human-readable status line.
    Status(String),
    /// Structured payload.
    Data(Value),
}

impl ProgressEvent {
    /// Text carried on the wire.
    pub fn to_payload(&self) -> String {
        match self {
            ProgressEvent::Status(text) => text.clone(),
            ProgressEvent::Data(value) => value.to_string(),
        }
    }
}

/// Sending half of a progress channel.
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

impl ProgressReporter {
    /// A reporter that drops every event.
    pub fn silent() -> Self {
        Self { tx: None }
    }

    /// A connected reporter and its receiver.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn status(&self, text: impl Into<String>) {
        self.send(ProgressEvent::Status(text.into()));
    }

    pub fn data(&self, value: Value) {
        self.send(ProgressEvent::Data(value));
    }

    fn send(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            // A closed receiver means the client went away; the workflow
            // still runs to completion.
            let _ = tx.send(event);
        }
    }
}
