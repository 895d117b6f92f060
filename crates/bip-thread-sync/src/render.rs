//! Message list → bubbles.

use bip_api_types::{AdminMeta, HistoryMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub initials: String,
    pub name: String,
}

impl Identity {
    pub fn new(initials: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            initials: initials.into(),
            name: name.into(),
        }
    }

    /// Take the non-empty fields of `meta`, keep the rest.
    pub fn merge(&mut self, meta: &AdminMeta) {
        if let Some(initials) = meta.initials.as_deref().filter(|v| !v.is_empty()) {
            self.initials = initials.to_owned();
        }
        if let Some(name) = meta.name.as_deref().filter(|v| !v.is_empty()) {
            self.name = name.to_owned();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyCopy {
    pub title: String,
    pub body: String,
}

/// Thread container configuration, read once from its data attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSettings {
    pub client: Identity,
    pub admin: Identity,
    pub empty: EmptyCopy,
}

impl Default for ThreadSettings {
    fn default() -> Self {
        Self {
            client: Identity::new("You", "You"),
            admin: Identity::new("RC", "Repair Crew"),
            empty: EmptyCopy {
                title: "No messages yet".to_owned(),
                body: String::new(),
            },
        }
    }
}

impl ThreadSettings {
    /// Build from a data-attribute lookup keyed by dataset name (`clientInitials`, ...).
    /// Missing or empty attributes keep the defaults.
    pub fn from_dataset<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str, fallback: String| lookup(key).filter(|v| !v.is_empty()).unwrap_or(fallback);

        Self {
            client: Identity::new(
                read("clientInitials", defaults.client.initials),
                read("clientName", defaults.client.name),
            ),
            admin: Identity::new(
                read("adminInitials", defaults.admin.initials),
                read("adminName", defaults.admin.name),
            ),
            empty: EmptyCopy {
                title: read("emptyTitle", defaults.empty.title),
                body: lookup("emptyBody").unwrap_or(defaults.empty.body),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    Client,
    Admin,
}

impl BubbleKind {
    /// BEM modifier used in `bubble--{modifier}`.
    pub fn modifier(self) -> &'static str {
        match self {
            BubbleKind::Client => "client",
            BubbleKind::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub kind: BubbleKind,
    pub initials: String,
    pub name: String,
    pub timestamp: String,
    pub subject: Option<String>,
    pub body: String,
    pub footer: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadView {
    Empty(EmptyCopy),
    Bubbles(Vec<Bubble>),
}

impl ThreadView {
    pub fn bubble_count(&self) -> usize {
        match self {
            ThreadView::Empty(_) => 0,
            ThreadView::Bubbles(bubbles) => bubbles.len(),
        }
    }
}

/// Client bubble per message, followed by an admin bubble when it carries a reply.
pub fn render_thread(
    messages: &[HistoryMessage],
    client: &Identity,
    admin: &Identity,
    empty: &EmptyCopy,
) -> ThreadView {
    if messages.is_empty() {
        return ThreadView::Empty(empty.clone());
    }

    let mut bubbles = Vec::with_capacity(messages.len() * 2);
    for message in messages {
        bubbles.push(Bubble {
            kind: BubbleKind::Client,
            initials: client.initials.clone(),
            name: client.name.clone(),
            timestamp: message.created_display.clone(),
            subject: message.subject.clone().filter(|subject| !subject.is_empty()),
            body: message.body.clone(),
            footer: vec![
                message.status_display.clone(),
                message.preferred_contact_display.clone(),
            ],
        });

        if let Some(reply) = message.admin_reply_text() {
            bubbles.push(Bubble {
                kind: BubbleKind::Admin,
                initials: admin.initials.clone(),
                name: admin.name.clone(),
                timestamp: message.updated_display.clone(),
                subject: None,
                body: reply.to_owned(),
                footer: Vec::new(),
            });
        }
    }
    ThreadView::Bubbles(bubbles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn message(id: u64, subject: Option<&str>, reply: Option<&str>) -> HistoryMessage {
        HistoryMessage {
            id,
            subject: subject.map(str::to_owned),
            body: format!("body {id}"),
            status_display: "Open".to_owned(),
            preferred_contact_display: "SMS".to_owned(),
            created_display: format!("created {id}"),
            updated_display: format!("updated {id}"),
            updated_iso: format!("iso {id}"),
            admin_reply: reply.map(str::to_owned),
            ..HistoryMessage::default()
        }
    }

    #[test]
    fn empty_list_renders_empty_state() {
        let settings = ThreadSettings::default();
        let view = render_thread(&[], &settings.client, &settings.admin, &settings.empty);
        assert_eq!(view, ThreadView::Empty(settings.empty.clone()));
        assert_eq!(view.bubble_count(), 0);
    }

    #[test]
    fn replies_follow_their_message() {
        let settings = ThreadSettings::default();
        let messages = vec![
            message(1, Some("Cracked screen"), Some("Bring it Friday")),
            message(2, Some(""), Some("")),
        ];
        let ThreadView::Bubbles(bubbles) =
            render_thread(&messages, &settings.client, &settings.admin, &settings.empty)
        else {
            panic!("expected bubbles");
        };

        let kinds: Vec<BubbleKind> = bubbles.iter().map(|bubble| bubble.kind).collect();
        assert_eq!(kinds, vec![BubbleKind::Client, BubbleKind::Admin, BubbleKind::Client]);

        assert_eq!(bubbles[0].subject.as_deref(), Some("Cracked screen"));
        assert_eq!(bubbles[0].timestamp, "created 1");
        assert_eq!(bubbles[0].footer, vec!["Open", "SMS"]);
        assert_eq!(bubbles[1].name, "Repair Crew");
        assert_eq!(bubbles[1].timestamp, "updated 1");
        assert_eq!(bubbles[1].subject, None);
        assert!(bubbles[1].footer.is_empty());
        assert_eq!(bubbles[2].subject, None);
    }

    #[test]
    fn settings_from_dataset_fall_back_per_field() {
        let attrs: HashMap<&str, &str> =
            HashMap::from([("clientName", "Maria Santos"), ("adminInitials", ""), ("emptyBody", "Say hi")]);
        let settings = ThreadSettings::from_dataset(|key| attrs.get(key).map(|v| v.to_string()));

        assert_eq!(settings.client, Identity::new("You", "Maria Santos"));
        assert_eq!(settings.admin, Identity::new("RC", "Repair Crew"));
        assert_eq!(settings.empty.title, "No messages yet");
        assert_eq!(settings.empty.body, "Say hi");
    }

    #[test]
    fn identity_merge_keeps_missing_fields() {
        let mut admin = Identity::new("RC", "Repair Crew");
        admin.merge(&AdminMeta {
            initials: Some("JD".to_owned()),
            name: None,
        });
        assert_eq!(admin, Identity::new("JD", "Repair Crew"));
        admin.merge(&AdminMeta {
            initials: Some(String::new()),
            name: Some("Juan Dela Cruz".to_owned()),
        });
        assert_eq!(admin, Identity::new("JD", "Juan Dela Cruz"));
    }
}
