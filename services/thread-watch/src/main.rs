use bip_thread_sync::{PollLoop, SyncOutcome, ThreadSync, refresh};
use std::cell::RefCell;
use tokio::sync::mpsc;
use tracing::{debug, info};

mod config;
mod print;
mod scheduler;
mod source;

use config::ThreadWatchConfig;
use scheduler::TokioScheduler;
use source::HttpHistorySource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ThreadWatchConfig::from_env()?;
    info!(
        "thread-watch polling {} every {}ms",
        config.history_url,
        config.poll_interval.as_millis()
    );

    let source = HttpHistorySource::new(&config.history_url, config.session_cookie.clone());
    let sync = RefCell::new(ThreadSync::new(config.thread_settings()));

    let (tick_tx, mut ticks) = mpsc::channel(1);
    let mut poll = PollLoop::new(TokioScheduler::new(tick_tx), config.poll_interval);

    if poll.start() {
        report(refresh(&sync, &source).await);
    }

    loop {
        tokio::select! {
            Some(()) = ticks.recv() => report(refresh(&sync, &source).await),
            signal = tokio::signal::ctrl_c() => {
                signal?;
                poll.stop();
                info!("thread-watch stopped after {} renders", sync.borrow().render_count());
                break;
            }
        }
    }

    Ok(())
}

fn report(outcome: SyncOutcome) {
    match outcome {
        SyncOutcome::Rendered(view) => println!("{}", print::format_thread(&view)),
        SyncOutcome::Unchanged => debug!("thread unchanged"),
        SyncOutcome::Stale => debug!("stale response dropped"),
        // already logged at warn by the sync layer
        SyncOutcome::Failed(_) => {}
    }
}
