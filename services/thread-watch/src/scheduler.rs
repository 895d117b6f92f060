use bip_thread_sync::Scheduler;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Ticks are delivered over a channel to the main loop, which owns the sync state.
/// The channel should hold a single tick: while a fetch is still running, later ticks
/// are dropped rather than queued.
pub(crate) struct TokioScheduler {
    ticks: Sender<()>,
}

impl TokioScheduler {
    pub(crate) fn new(ticks: Sender<()>) -> Self {
        Self { ticks }
    }
}

pub(crate) struct TickerHandle(JoinHandle<()>);

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TickerHandle;

    fn every(&mut self, period: Duration) -> Self::Handle {
        let ticks = self.ticks.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                match ticks.try_send(()) {
                    Ok(()) | Err(TrySendError::Full(())) => {}
                    Err(TrySendError::Closed(())) => break,
                }
            }
        });
        TickerHandle(task)
    }
}
