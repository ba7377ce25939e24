//! SSE transport for cell streams.
//!
//! Updates are framed as Datastar `merge-fragments` events so the browser
//! swaps the rendered cell in place by element id.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

use super::{BroadcastSummary, CellSink, CellStream, CellUpdate, run_broadcast};
use crate::error::StreamError;
use crate::middleware::SessionId;
use crate::views;

/// SSE event name understood by the Datastar client.
pub const MERGE_FRAGMENTS: &str = "datastar-merge-fragments";

const CHANNEL_CAPACITY: usize = 32;

/// Response body type of a cell stream.
pub type CellEventStream = KeepAliveStream<ReceiverStream<Result<Event, Infallible>>>;

/// Writes updates into the channel backing an SSE response body.
#[derive(Debug)]
pub struct SseCellSink {
    grid: &'static str,
    tx: mpsc::Sender<Result<Event, Infallible>>,
}

impl SseCellSink {
    /// Creates a sink rendering cells for `grid`.
    #[must_use]
    pub fn new(grid: &'static str, tx: mpsc::Sender<Result<Event, Infallible>>) -> Self {
        Self { grid, tx }
    }
}

/// Frames one update as a merge-fragments event.
#[must_use]
pub fn merge_fragments_event(grid: &str, update: &CellUpdate) -> Event {
    Event::default()
        .event(MERGE_FRAGMENTS)
        .data(format!("fragments {}", views::hex_cell(grid, update)))
}

impl CellSink for SseCellSink {
    async fn send(&mut self, update: CellUpdate) -> Result<(), StreamError> {
        self.tx
            .send(Ok(merge_fragments_event(self.grid, &update)))
            .await
            .map_err(|_| StreamError::Disconnected)
    }
}

/// Spawns the broadcast task for one connection and returns the channel it
/// writes into, with the task's handle.
///
/// The task treats the receiver being dropped as cancellation, so dropping
/// the returned stream ends it within one select.
pub fn spawn_cell_stream(
    stream: CellStream,
    session: SessionId,
) -> (
    ReceiverStream<Result<Event, Infallible>>,
    JoinHandle<Result<BroadcastSummary, StreamError>>,
) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let watcher = tx.clone();

    let task = tokio::spawn(async move {
        let mut sink = SseCellSink::new(stream.grid, tx);
        let mut rng = StdRng::from_entropy();
        let closed = async move { watcher.closed().await };

        let result = run_broadcast(&mut sink, &mut rng, stream.settings, closed).await;
        match &result {
            Ok(summary) => tracing::info!(
                session = %session,
                grid = stream.grid,
                sent = summary.sent,
                reason = ?summary.reason,
                "cell_stream_closed"
            ),
            Err(err) => tracing::warn!(
                session = %session,
                grid = stream.grid,
                error = %err,
                "cell_stream_failed"
            ),
        }
        result
    });

    (ReceiverStream::new(rx), task)
}

/// SSE response for one connection. Axum dropping the body on client
/// disconnect cancels the broadcast task.
pub fn open_cell_stream(stream: CellStream, session: SessionId) -> Sse<CellEventStream> {
    let (events, _task) = spawn_cell_stream(stream, session);
    Sse::new(events).keep_alive(KeepAlive::default())
}
