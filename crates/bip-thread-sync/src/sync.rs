use crate::render::{self, Identity, ThreadSettings, ThreadView};
use crate::signature::ThreadSignature;
use async_trait::async_trait;
use bip_api_types::HistoryResponse;
use std::cell::RefCell;
use tracing::{debug, warn};

/// Marks the request as an in-page fetch so the server answers with JSON.
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Where thread history comes from. The browser host uses `fetch`, the native watcher
/// uses reqwest.
#[async_trait(?Send)]
pub trait HistorySource {
    async fn fetch_history(&self) -> anyhow::Result<HistoryResponse>;
}

/// Issued when a fetch begins; responses carrying an older ticket than the last one
/// applied are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Rendered(ThreadView),
    Unchanged,
    Stale,
    /// The fetch failed; carries the error chain for the host's log.
    Failed(String),
}

#[derive(Debug)]
pub struct ThreadSync {
    settings: ThreadSettings,
    admin: Identity,
    last_signature: ThreadSignature,
    issued: u64,
    applied: u64,
    renders: u64,
}

impl ThreadSync {
    pub fn new(settings: ThreadSettings) -> Self {
        let admin = settings.admin.clone();
        Self {
            settings,
            admin,
            last_signature: ThreadSignature::default(),
            issued: 0,
            applied: 0,
            renders: 0,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    pub fn apply(&mut self, ticket: FetchTicket, response: HistoryResponse) -> SyncOutcome {
        if ticket.0 < self.applied {
            debug!(ticket = ticket.0, applied = self.applied, "discarding stale thread response");
            return SyncOutcome::Stale;
        }
        self.applied = ticket.0;

        let signature = ThreadSignature::of(&response.messages);
        if signature == self.last_signature {
            return SyncOutcome::Unchanged;
        }
        self.last_signature = signature;

        if let Some(meta) = &response.admin {
            self.admin.merge(meta);
        }

        self.renders += 1;
        let view = render::render_thread(
            &response.messages,
            &self.settings.client,
            &self.admin,
            &self.settings.empty,
        );
        debug!(bubbles = view.bubble_count(), "thread re-rendered");
        SyncOutcome::Rendered(view)
    }

    /// A failed fetch leaves everything as it was; the next tick retries.
    pub fn record_failure(&mut self, ticket: FetchTicket, error: &anyhow::Error) -> SyncOutcome {
        let reason = format!("{error:#}");
        warn!(ticket = ticket.0, "thread history fetch failed: {reason}");
        SyncOutcome::Failed(reason)
    }

    pub fn last_signature(&self) -> &ThreadSignature {
        &self.last_signature
    }

    pub fn admin(&self) -> &Identity {
        &self.admin
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }
}

/// One fetch-and-apply cycle. The borrow is released while the request is in flight so
/// overlapping refreshes can interleave.
pub async fn refresh<H>(sync: &RefCell<ThreadSync>, source: &H) -> SyncOutcome
where
    H: HistorySource + ?Sized,
{
    let ticket = sync.borrow_mut().begin_fetch();
    let result = source.fetch_history().await;
    let mut sync = sync.borrow_mut();
    match result {
        Ok(response) => sync.apply(ticket, response),
        Err(error) => sync.record_failure(ticket, &error),
    }
}
