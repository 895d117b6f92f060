use serde::{Deserialize, Serialize};

/// One selectable `<option>`: submitted value plus display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Gcash,
    #[default]
    Personal,
}

impl PaymentMethod {
    /// Radio value as submitted by the booking form. Unknown values fall back to cash.
    pub fn from_form_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("gcash") => PaymentMethod::Gcash,
            _ => PaymentMethod::Personal,
        }
    }
}

// ── Contact thread history (GET <history_url>) ──

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
    #[serde(default)]
    pub admin: Option<AdminMeta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryMessage {
    pub id: u64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_display: String,
    #[serde(default)]
    pub preferred_contact_display: String,
    #[serde(default)]
    pub created_display: String,
    #[serde(default)]
    pub created_iso: Option<String>,
    #[serde(default)]
    pub updated_display: String,
    #[serde(default)]
    pub updated_iso: String,
    #[serde(default)]
    pub admin_reply: Option<String>,
    #[serde(default)]
    pub replies: Vec<HistoryReply>,
}

impl HistoryMessage {
    /// Admin reply text, treating an empty string the same as no reply.
    pub fn admin_reply_text(&self) -> Option<&str> {
        self.admin_reply.as_deref().filter(|reply| !reply.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryReply {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub created_display: String,
    #[serde(default)]
    pub created_iso: Option<String>,
    #[serde(default)]
    pub admin_initials: Option<String>,
    #[serde(default)]
    pub admin_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminMeta {
    #[serde(default)]
    pub initials: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
