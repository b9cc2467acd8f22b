//! Server-sent event streaming for long-running workflows.
//!
//! The workflow runs on its own task and reports through a
//! [`ProgressReporter`]. When it finishes, one terminal event carries the
//! result or the error. A client that disconnects does not cancel the task.

use std::convert::Infallible;
use std::future::Future;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, BoxStream, StreamExt};
use serde::Serialize;
use serde_json::{json, Value};

use crate::application::{ProgressReporter, ServiceError};

/// Sentinel sent after the terminal event of batch streams.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Response type of every streaming endpoint.
pub type EventStream = Sse<BoxStream<'static, Result<Event, Infallible>>>;

/// How a stream ends after its terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    Close,
    DoneSentinel,
}

/// Terminal payload for a workflow outcome.
pub fn terminal_event<T: Serialize>(outcome: &Result<T, ServiceError>) -> Value {
    match outcome {
        Ok(data) => json!({ "status": "success", "data": data, "status_code": 200 }),
        Err(err) => json!({ "status": "error", "error": err.to_string() }),
    }
}

/// Spawns `workflow` and streams its progress followed by the outcome.
pub fn stream_workflow<F, Fut, T>(
    workflow: F,
    end: StreamEnd,
) -> EventStream
where
    F: FnOnce(ProgressReporter) -> Fut,
    Fut: Future<Output = Result<T, ServiceError>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let (reporter, receiver) = ProgressReporter::channel();
    let run = workflow(reporter.clone());

    tokio::spawn(async move {
        let outcome = run.await;
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "Streaming workflow failed");
        }
        reporter.data(terminal_event(&outcome));
        if end == StreamEnd::DoneSentinel {
            reporter.status(DONE_SENTINEL);
        }
    });

    let events = stream::unfold(receiver, |mut receiver| async move {
        let event = receiver.recv().await?;
        Some((Ok(Event::default().data(event.to_payload())), receiver))
    });

    Sse::new(events.boxed()).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_event_carries_data() {
        let outcome: Result<&str, ServiceError> = Ok("narration");
        assert_eq!(
            terminal_event(&outcome),
            json!({"status": "success", "data": "narration", "status_code": 200})
        );
    }

    #[test]
    fn error_event_carries_message() {
        let outcome: Result<String, ServiceError> =
            Err(ServiceError::not_found("Slide image not found"));
        assert_eq!(
            terminal_event(&outcome),
            json!({"status": "error", "error": "Slide image not found"})
        );
    }
}
