use bip_api_types::HistoryMessage;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

/// Digest of what a thread render depends on: each message's id, last update and reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadSignature(String);

impl ThreadSignature {
    pub fn of(messages: &[HistoryMessage]) -> Self {
        let tuples: Vec<Value> = messages
            .iter()
            .map(|message| {
                json!([
                    message.id,
                    message.updated_iso,
                    message.admin_reply.as_deref().unwrap_or("")
                ])
            })
            .collect();
        let encoded = Value::Array(tuples).to_string();
        let digest = Sha256::digest(encoded.as_bytes());
        Self(hex_lower(&digest))
    }

    /// True only before the first successful fetch.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: u64, updated: &str, reply: Option<&str>) -> HistoryMessage {
        HistoryMessage {
            id,
            body: format!("message {id}"),
            updated_iso: updated.to_owned(),
            admin_reply: reply.map(str::to_owned),
            ..HistoryMessage::default()
        }
    }

    #[test]
    fn ignores_fields_outside_the_tuple() {
        let mut a = message(1, "2026-10-01T08:00:00+08:00", None);
        let b = a.clone();
        a.status_display = "In review".to_owned();
        a.body = "edited elsewhere".to_owned();
        assert_eq!(ThreadSignature::of(&[a]), ThreadSignature::of(&[b]));
    }

    #[test]
    fn missing_and_empty_reply_match() {
        let none = message(1, "t1", None);
        let empty = message(1, "t1", Some(""));
        assert_eq!(ThreadSignature::of(&[none]), ThreadSignature::of(&[empty]));
    }

    #[test]
    fn changes_on_reply_update_or_order() {
        let base = vec![message(1, "t1", None), message(2, "t2", None)];
        let replied = vec![message(1, "t1", Some("On it")), message(2, "t2", None)];
        let bumped = vec![message(1, "t1b", None), message(2, "t2", None)];
        let swapped = vec![message(2, "t2", None), message(1, "t1", None)];

        let sig = ThreadSignature::of(&base);
        assert_ne!(sig, ThreadSignature::of(&replied));
        assert_ne!(sig, ThreadSignature::of(&bumped));
        assert_ne!(sig, ThreadSignature::of(&swapped));
        assert_eq!(sig.as_str().len(), 64);
    }

    #[test]
    fn empty_thread_differs_from_never_fetched() {
        let fetched = ThreadSignature::of(&[]);
        assert!(!fetched.is_empty());
        assert_ne!(fetched, ThreadSignature::default());
    }
}
