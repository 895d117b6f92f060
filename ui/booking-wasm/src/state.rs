//! Page-level state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded). The booking
//! engine and thread sync own their state through the handlers that drive them; what lives
//! here is the chrome that several listeners share.

use bip_booking_core::chrome::{FlagStore, Overlay};
use gloo_timers::callback::Interval;
use std::cell::RefCell;

#[derive(Default)]
pub struct PageState {
    pub gate: Overlay,
    pub policy_modal: Overlay,
    /// Captured `beforeinstallprompt` event, replayed by the install trigger.
    pub install_prompt: Option<web_sys::Event>,
    pub clock: Option<Interval>,
}

// ── Thread-local singleton ──

thread_local! {
    static STATE: RefCell<PageState> = RefCell::new(PageState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&PageState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut PageState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── localStorage ──

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// `localStorage`, when the browser lets us have it.
pub struct WebStorage(web_sys::Storage);

impl WebStorage {
    pub fn open() -> Option<Self> {
        storage().map(Self)
    }
}

impl FlagStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let _ = self.0.set_item(key, value);
    }
}
