//! Page chrome: persisted dismissal flags, overlay visibility, password masking.
//!
//! Storage may be missing entirely (private mode, blocked cookies). Hosts pass `None`
//! for the store in that case and every flag reads as fresh.

pub const DEFAULT_DISCLAIMER_KEY: &str = "biprepair_disclaimer";
pub const DISCLAIMER_ACK: &str = "ack";
pub const INSTALL_DISMISSED_KEY: &str = "biprepair_install_dismissed";
pub const INSTALL_DISMISSED: &str = "true";
pub const DEFAULT_APP_LABEL: &str = "BiPSU Repair";

/// Client-local key/value storage (`localStorage` in the browser).
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

pub fn disclaimer_key(configured: Option<&str>) -> &str {
    configured
        .filter(|key| !key.is_empty())
        .unwrap_or(DEFAULT_DISCLAIMER_KEY)
}

pub fn disclaimer_acknowledged<S: FlagStore>(store: Option<&S>, key: &str) -> bool {
    store.and_then(|store| store.get(key)).as_deref() == Some(DISCLAIMER_ACK)
}

pub fn acknowledge_disclaimer<S: FlagStore>(store: Option<&S>, key: &str) {
    if let Some(store) = store {
        store.set(key, DISCLAIMER_ACK);
    }
}

pub fn install_dismissed<S: FlagStore>(store: Option<&S>) -> bool {
    store.and_then(|store| store.get(INSTALL_DISMISSED_KEY)).as_deref() == Some(INSTALL_DISMISSED)
}

pub fn dismiss_install<S: FlagStore>(store: Option<&S>) {
    if let Some(store) = store {
        store.set(INSTALL_DISMISSED_KEY, INSTALL_DISMISSED);
    }
}

/// The install banner is only offered on phones and tablets.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    ["iphone", "ipad", "android", "mobile"]
        .iter()
        .any(|marker| ua.contains(marker))
}

pub fn install_copy(app_label: Option<&str>) -> String {
    let label = app_label.filter(|label| !label.is_empty()).unwrap_or(DEFAULT_APP_LABEL);
    format!("Add {label} to your device for one-tap access.")
}

pub fn is_admin_path(path: &str) -> bool {
    path.starts_with("/admin")
}

/// Whether the sign-in gate reacts to triggers on this page.
pub fn gate_enabled(client_authenticated: bool, path: &str) -> bool {
    !client_authenticated && !is_admin_path(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Closed,
    Open,
}

impl Overlay {
    /// State of an overlay as the server rendered it.
    pub fn from_hidden(hidden: bool) -> Overlay {
        if hidden { Overlay::Closed } else { Overlay::Open }
    }

    pub fn is_open(self) -> bool {
        self == Overlay::Open
    }

    /// Escape only closes an overlay that is showing.
    pub fn on_escape(self) -> Option<Overlay> {
        self.is_open().then_some(Overlay::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordMask {
    revealed: bool,
}

impl PasswordMask {
    pub fn toggle(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn input_type(self) -> &'static str {
        if self.revealed { "text" } else { "password" }
    }

    pub fn button_text(self) -> &'static str {
        if self.revealed { "Hide" } else { "Show" }
    }

    pub fn aria_label(self) -> &'static str {
        if self.revealed { "Hide password" } else { "Show password" }
    }
}
