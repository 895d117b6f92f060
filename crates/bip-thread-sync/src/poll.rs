//! Poll timer lifecycle.
//!
//! At most one periodic timer is live at a time. Starting while polling does nothing;
//! stopping drops the handle, which is what cancels the timer.

use std::time::Duration;

pub const POLL_INTERVAL: Duration = Duration::from_millis(6000);

/// Source of periodic ticks. Dropping the returned handle must cancel the timer.
pub trait Scheduler {
    type Handle;

    fn every(&mut self, period: Duration) -> Self::Handle;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

pub struct PollLoop<S: Scheduler> {
    scheduler: S,
    period: Duration,
    timer: Option<S::Handle>,
}

impl<S: Scheduler> PollLoop<S> {
    /// Idle until the host calls [`PollLoop::start`] on mount.
    pub fn new(scheduler: S, period: Duration) -> Self {
        Self {
            scheduler,
            period,
            timer: None,
        }
    }

    pub fn state(&self) -> PollState {
        if self.timer.is_some() {
            PollState::Polling
        } else {
            PollState::Idle
        }
    }

    /// Returns true when a timer was started; the caller then fetches immediately.
    pub fn start(&mut self) -> bool {
        if self.timer.is_some() {
            return false;
        }
        self.timer = Some(self.scheduler.every(self.period));
        true
    }

    pub fn stop(&mut self) -> bool {
        self.timer.take().is_some()
    }

    /// Returns true when the caller should fetch now.
    pub fn on_visibility(&mut self, visibility: Visibility) -> bool {
        match visibility {
            Visibility::Visible => self.start(),
            Visibility::Hidden => {
                self.stop();
                false
            }
        }
    }

    /// The composer posts a full page; nothing should tick while it navigates away.
    pub fn on_composer_submit(&mut self) {
        self.stop();
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingScheduler {
        live: Rc<Cell<usize>>,
        started: usize,
    }

    struct CountingHandle(Rc<Cell<usize>>);

    impl Drop for CountingHandle {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    impl Scheduler for CountingScheduler {
        type Handle = CountingHandle;

        fn every(&mut self, period: Duration) -> Self::Handle {
            assert_eq!(period, POLL_INTERVAL);
            self.started += 1;
            self.live.set(self.live.get() + 1);
            CountingHandle(Rc::clone(&self.live))
        }
    }

    fn poll_loop() -> (PollLoop<CountingScheduler>, Rc<Cell<usize>>) {
        let scheduler = CountingScheduler::default();
        let live = Rc::clone(&scheduler.live);
        (PollLoop::new(scheduler, POLL_INTERVAL), live)
    }

    #[test]
    fn start_is_idempotent() {
        let (mut poll, live) = poll_loop();
        assert_eq!(poll.state(), PollState::Idle);

        assert!(poll.start());
        assert!(!poll.start());
        assert_eq!(poll.state(), PollState::Polling);
        assert_eq!(live.get(), 1);
        assert_eq!(poll.scheduler().started, 1);
    }

    #[test]
    fn visibility_toggles_keep_one_timer_at_most() {
        let (mut poll, live) = poll_loop();
        poll.start();

        assert!(!poll.on_visibility(Visibility::Hidden));
        assert_eq!(live.get(), 0);
        assert!(poll.on_visibility(Visibility::Visible));
        assert_eq!(live.get(), 1);
        assert!(!poll.on_visibility(Visibility::Visible));
        assert_eq!(live.get(), 1);
        poll.on_visibility(Visibility::Hidden);
        assert_eq!(live.get(), 0);
        assert_eq!(poll.state(), PollState::Idle);
    }

    #[test]
    fn composer_submit_stops_polling() {
        let (mut poll, live) = poll_loop();
        poll.start();
        poll.on_composer_submit();
        assert_eq!(live.get(), 0);
        assert!(!poll.stop());
    }
}
