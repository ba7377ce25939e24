//! The per-connection tick loop.

use std::future::Future;

use rand::Rng;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{BroadcastSettings, CellUpdate};
use crate::error::StreamError;

/// Destination of cell updates: frames and flushes one update at a time.
pub trait CellSink {
    /// Writes one update to the client.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError`] when the update cannot be delivered. The
    /// stream is finished after the first failure.
    fn send(
        &mut self,
        update: CellUpdate,
    ) -> impl Future<Output = Result<(), StreamError>> + Send;
}

/// Why a stream ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The client went away.
    Cancelled,
    /// The preset's maximum duration elapsed.
    DeadlineReached,
}

/// Outcome of a stream that ended cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastSummary {
    /// Updates successfully written.
    pub sent: u64,
    /// Terminal condition.
    pub reason: StopReason,
}

/// Drives one stream until `cancelled` resolves, the deadline passes, or a
/// write fails.
///
/// Cancellation is checked before the deadline and the deadline before the
/// next tick. Each write inside a tick races both signals too, so a sink
/// that blocks on backpressure cannot deliver anything after either has
/// fired. The interval timer lives on this future's stack and is released
/// on every return.
///
/// # Errors
///
/// Returns the sink's [`StreamError`] on the first failed write. Updates
/// already written stay delivered; no retry is attempted.
pub async fn run_broadcast<S, R, C>(
    sink: &mut S,
    rng: &mut R,
    settings: BroadcastSettings,
    cancelled: C,
) -> Result<BroadcastSummary, StreamError>
where
    S: CellSink,
    R: Rng,
    C: Future<Output = ()>,
{
    let start = Instant::now();
    let deadline_at = start + settings.max_duration;
    let mut ticker = time::interval_at(start + settings.tick_interval, settings.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let deadline = time::sleep_until(deadline_at);
    tokio::pin!(deadline);
    tokio::pin!(cancelled);

    let mut sent: u64 = 0;
    let reason = 'stream: loop {
        tokio::select! {
            biased;
            () = &mut cancelled => break 'stream StopReason::Cancelled,
            () = &mut deadline => break 'stream StopReason::DeadlineReached,
            _ = ticker.tick() => {}
        }

        for _ in 0..settings.updates_per_tick {
            if Instant::now() >= deadline_at {
                break 'stream StopReason::DeadlineReached;
            }
            let update = CellUpdate::random(rng, settings.cells);
            let written = tokio::select! {
                biased;
                () = &mut cancelled => break 'stream StopReason::Cancelled,
                () = &mut deadline => break 'stream StopReason::DeadlineReached,
                written = sink.send(update) => written,
            };
            if let Err(err) = written {
                tracing::debug!(sent, error = %err, "cell stream write failed");
                return Err(err);
            }
            sent += 1;
        }
    };

    tracing::debug!(sent, ?reason, "cell stream finished");
    Ok(BroadcastSummary { sent, reason })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::stream::{HERO_GRID, MATRIX_RAIN, WIDE_GRID};

    /// Records every update; optionally fails on the n-th write (1-based).
    #[derive(Debug, Default)]
    struct RecordingSink {
        updates: Vec<CellUpdate>,
        attempts: usize,
        fail_on: Option<usize>,
    }

    impl CellSink for RecordingSink {
        async fn send(&mut self, update: CellUpdate) -> Result<(), StreamError> {
            self.attempts += 1;
            if self.fail_on == Some(self.attempts) {
                return Err(StreamError::Disconnected);
            }
            self.updates.push(update);
            Ok(())
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[tokio::test(start_paused = true)]
    async fn runs_until_deadline_when_never_cancelled() {
        let mut sink = RecordingSink::default();
        let result = run_broadcast(
            &mut sink,
            &mut rng(),
            HERO_GRID.settings,
            std::future::pending::<()>(),
        )
        .await;

        let Ok(summary) = result else {
            panic!("deadline must end the stream cleanly");
        };
        assert_eq!(summary.reason, StopReason::DeadlineReached);
        assert!(
            (595..=600).contains(&sink.updates.len()),
            "got {} updates",
            sink.updates.len()
        );
        assert_eq!(summary.sent, sink.updates.len() as u64);
        for update in &sink.updates {
            assert!(update.index < 96);
            assert_eq!(update.value.len(), 2);
            assert!(update.value.bytes().all(|b| b.is_ascii_hexdigit()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_before_first_tick_emits_nothing() {
        let mut sink = RecordingSink::default();
        let result = run_broadcast(
            &mut sink,
            &mut rng(),
            HERO_GRID.settings,
            time::sleep(Duration::from_millis(10)),
        )
        .await;

        let Ok(summary) = result else {
            panic!("cancellation is not an error");
        };
        assert_eq!(summary.reason, StopReason::Cancelled);
        assert_eq!(summary.sent, 0);
        assert!(sink.updates.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_further_writes() {
        let mut sink = RecordingSink::default();
        let result = run_broadcast(
            &mut sink,
            &mut rng(),
            WIDE_GRID.settings,
            time::sleep(Duration::from_millis(275)),
        )
        .await;

        let Ok(summary) = result else {
            panic!("cancellation is not an error");
        };
        assert_eq!(summary.reason, StopReason::Cancelled);
        // ticks at 50, 100, 150, 200, 250
        assert_eq!(sink.updates.len(), 5);
        assert!(sink.updates.iter().all(|u| u.index < 384));
    }

    #[tokio::test(start_paused = true)]
    async fn write_failure_ends_stream_after_prior_successes() {
        let mut sink = RecordingSink {
            fail_on: Some(5),
            ..RecordingSink::default()
        };
        let result = run_broadcast(
            &mut sink,
            &mut rng(),
            HERO_GRID.settings,
            std::future::pending::<()>(),
        )
        .await;

        assert_eq!(result, Err(StreamError::Disconnected));
        assert_eq!(sink.updates.len(), 4);
        assert_eq!(sink.attempts, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn multi_update_ticks_write_each_update() {
        let mut sink = RecordingSink::default();
        let result = run_broadcast(
            &mut sink,
            &mut rng(),
            MATRIX_RAIN.settings,
            time::sleep(Duration::from_millis(120)),
        )
        .await;

        assert!(result.is_ok());
        // two ticks of three updates each
        assert_eq!(sink.updates.len(), 6);
        assert!(sink.updates.iter().all(|u| u.index < 768));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_mid_tick_skips_the_rest_of_that_tick() {
        let mut sink = RecordingSink {
            fail_on: Some(2),
            ..RecordingSink::default()
        };
        let result = run_broadcast(
            &mut sink,
            &mut rng(),
            MATRIX_RAIN.settings,
            std::future::pending::<()>(),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(sink.updates.len(), 1);
        assert_eq!(sink.attempts, 2);
    }

    /// Takes 30 ms per write and records when each write completed.
    #[derive(Debug)]
    struct SlowSink {
        start: Instant,
        written_at: Vec<Duration>,
    }

    impl SlowSink {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                written_at: Vec::new(),
            }
        }
    }

    impl CellSink for SlowSink {
        async fn send(&mut self, _update: CellUpdate) -> Result<(), StreamError> {
            time::sleep(Duration::from_millis(30)).await;
            self.written_at.push(self.start.elapsed());
            Ok(())
        }
    }

    const BURSTY: BroadcastSettings = BroadcastSettings {
        cells: 16,
        updates_per_tick: 3,
        tick_interval: Duration::from_millis(50),
        max_duration: Duration::from_millis(100),
    };

    #[tokio::test(start_paused = true)]
    async fn blocked_write_does_not_outlive_deadline() {
        let mut sink = SlowSink::new();
        let result = run_broadcast(&mut sink, &mut rng(), BURSTY, std::future::pending::<()>())
            .await;

        let Ok(summary) = result else {
            panic!("deadline must end the stream cleanly");
        };
        assert_eq!(summary.reason, StopReason::DeadlineReached);
        // tick at 50 ms, first write lands at 80 ms, second is cut off at 100 ms
        assert_eq!(sink.written_at, vec![Duration::from_millis(80)]);
        assert_eq!(summary.sent, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn blocked_write_does_not_outlive_cancellation() {
        let settings = BroadcastSettings {
            max_duration: Duration::from_secs(10),
            ..BURSTY
        };
        let mut sink = SlowSink::new();
        let result = run_broadcast(
            &mut sink,
            &mut rng(),
            settings,
            time::sleep(Duration::from_millis(90)),
        )
        .await;

        let Ok(summary) = result else {
            panic!("cancellation is not an error");
        };
        assert_eq!(summary.reason, StopReason::Cancelled);
        assert!(sink.written_at.iter().all(|at| *at <= Duration::from_millis(90)));
        assert_eq!(summary.sent, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_bounds_short_streams() {
        let settings = BroadcastSettings {
            cells: 16,
            updates_per_tick: 1,
            tick_interval: Duration::from_millis(50),
            max_duration: Duration::from_millis(260),
        };
        let mut sink = RecordingSink::default();
        let result = run_broadcast(&mut sink, &mut rng(), settings, std::future::pending::<()>())
            .await;

        let Ok(summary) = result else {
            panic!("deadline must end the stream cleanly");
        };
        assert_eq!(summary.reason, StopReason::DeadlineReached);
        assert_eq!(sink.updates.len(), 5);
    }
}
