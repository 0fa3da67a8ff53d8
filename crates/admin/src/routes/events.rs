//! Event stream route.
//!
//! `GET /api/events` delivers every successful mutation to the observer as
//! a server-sent event named after the change (`categoryUpdated`,
//! `newOrder`, ...). Each observer first receives a `welcome` event, then
//! the live stream from its moment of subscription onward; there is no
//! replay of earlier events. A slow observer that overflows its buffer
//! skips the missed events and continues from the live edge.

use std::convert::Infallible;

use async_stream::stream;
use axum::{
    Router,
    extract::State,
    response::{
        Sse,
        sse::{Event, KeepAlive},
    },
    routing::get,
};
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events", get(stream_events))
}

async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.broadcaster().subscribe();
    tracing::debug!(
        observers = state.broadcaster().observer_count(),
        "observer connected"
    );

    let stream = stream! {
        yield Ok(Event::default()
            .event("welcome")
            .data(r#"{"message":"Welcome to the event stream"}"#));

        loop {
            match rx.recv().await {
                Ok(change) => {
                    match serde_json::to_string(&change.data) {
                        Ok(json) => {
                            yield Ok(Event::default().event(change.kind.as_str()).data(json));
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "failed to serialize event payload");
                        }
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "observer lagging; skipped missed events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
