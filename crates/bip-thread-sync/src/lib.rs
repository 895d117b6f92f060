//! Support-thread synchronisation.
//!
//! Polls a conversation's history, skips repaints when nothing visible changed, and
//! turns the message list into bubbles. Timers and HTTP are behind the [`Scheduler`]
//! and [`HistorySource`] traits so the browser and the native watcher share one engine.

pub mod poll;
pub mod render;
pub mod signature;
pub mod sync;

pub use poll::{POLL_INTERVAL, PollLoop, PollState, Scheduler, Visibility};
pub use render::{Bubble, BubbleKind, EmptyCopy, Identity, ThreadSettings, ThreadView};
pub use signature::ThreadSignature;
pub use sync::{FetchTicket, HistorySource, REQUESTED_WITH, SyncOutcome, ThreadSync, refresh};
