use bip_thread_sync::{BubbleKind, ThreadView};
use std::fmt::Write;

/// Plain-text rendering of a thread for the terminal.
pub(crate) fn format_thread(view: &ThreadView) -> String {
    let mut out = String::new();
    match view {
        ThreadView::Empty(copy) => {
            let _ = writeln!(out, "-- {} --", copy.title);
            if !copy.body.is_empty() {
                let _ = writeln!(out, "{}", copy.body);
            }
        }
        ThreadView::Bubbles(bubbles) => {
            for bubble in bubbles {
                let indent = match bubble.kind {
                    BubbleKind::Client => "",
                    BubbleKind::Admin => "    ",
                };
                let _ = writeln!(out, "{indent}[{}] {}  {}", bubble.initials, bubble.name, bubble.timestamp);
                if let Some(subject) = &bubble.subject {
                    let _ = writeln!(out, "{indent}  {subject}");
                }
                for line in bubble.body.lines() {
                    let _ = writeln!(out, "{indent}  {line}");
                }
                let footer: Vec<&str> = bubble
                    .footer
                    .iter()
                    .map(String::as_str)
                    .filter(|part| !part.is_empty())
                    .collect();
                if !footer.is_empty() {
                    let _ = writeln!(out, "{indent}  ({})", footer.join(" | "));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bip_thread_sync::{Bubble, EmptyCopy};

    #[test]
    fn empty_thread_prints_title() {
        let view = ThreadView::Empty(EmptyCopy {
            title: "No messages yet".to_owned(),
            body: String::new(),
        });
        assert_eq!(format_thread(&view), "-- No messages yet --\n");
    }

    #[test]
    fn admin_replies_are_indented() {
        let view = ThreadView::Bubbles(vec![
            Bubble {
                kind: BubbleKind::Client,
                initials: "You".to_owned(),
                name: "You".to_owned(),
                timestamp: "Oct 02".to_owned(),
                subject: Some("Screen".to_owned()),
                body: "Cracked".to_owned(),
                footer: vec!["Open".to_owned(), String::new()],
            },
            Bubble {
                kind: BubbleKind::Admin,
                initials: "RC".to_owned(),
                name: "Repair Crew".to_owned(),
                timestamp: "Oct 03".to_owned(),
                subject: None,
                body: "Bring it in".to_owned(),
                footer: Vec::new(),
            },
        ]);

        let text = format_thread(&view);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[You] You  Oct 02",
                "  Screen",
                "  Cracked",
                "  (Open)",
                "    [RC] Repair Crew  Oct 03",
                "      Bring it in",
            ]
        );
    }
}
