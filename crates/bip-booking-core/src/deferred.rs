//! Two-phase hide for suggestion dropdowns.
//!
//! Blur arms a ticket and the host schedules the hide after a short delay. A pick that
//! lands first revokes the ticket, so the late hide finds nothing to commit. Hosts should
//! also cancel their timer on revoke; the ticket check keeps a timer that slipped through
//! harmless.

use std::time::Duration;

pub const BLUR_HIDE_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideTicket(u64);

#[derive(Debug, Default)]
pub struct DeferredHide {
    armed: Option<HideTicket>,
    issued: u64,
}

impl DeferredHide {
    /// Arm a new pending hide, superseding any earlier one.
    pub fn arm(&mut self) -> HideTicket {
        self.issued += 1;
        let ticket = HideTicket(self.issued);
        self.armed = Some(ticket);
        ticket
    }

    /// Drop the pending hide. Returns whether one was armed.
    pub fn revoke(&mut self) -> bool {
        self.armed.take().is_some()
    }

    /// Second phase: true when `ticket` is still the armed one, which consumes it.
    pub fn commit(&mut self, ticket: HideTicket) -> bool {
        if self.armed == Some(ticket) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_after_arm() {
        let mut hide = DeferredHide::default();
        let ticket = hide.arm();
        assert!(hide.is_armed());
        assert!(hide.commit(ticket));
        assert!(!hide.commit(ticket));
    }

    #[test]
    fn revoked_ticket_never_commits() {
        let mut hide = DeferredHide::default();
        let ticket = hide.arm();
        assert!(hide.revoke());
        assert!(!hide.commit(ticket));
        assert!(!hide.revoke());
    }

    #[test]
    fn newer_blur_supersedes_older_ticket() {
        let mut hide = DeferredHide::default();
        let first = hide.arm();
        let second = hide.arm();
        assert!(!hide.commit(first));
        assert!(hide.commit(second));
    }
}
