use bip_api_types::PaymentMethod;

pub const GCASH_NOTE: &str = "We will send the GCash QR via Messenger before the meetup.";
pub const CASH_NOTE: &str = "Bring exact cash for onsite payment after diagnostics.";

/// Contact link and note for the selected payment radio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentWidget {
    pub method: PaymentMethod,
    pub contact_link_visible: bool,
    pub contact_href: Option<String>,
    pub note: &'static str,
}

pub fn payment_widget(method: PaymentMethod, contact_url: Option<&str>) -> PaymentWidget {
    match method {
        PaymentMethod::Gcash => PaymentWidget {
            method,
            contact_link_visible: true,
            contact_href: contact_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_owned),
            note: GCASH_NOTE,
        },
        PaymentMethod::Personal => PaymentWidget {
            method,
            contact_link_visible: false,
            contact_href: None,
            note: CASH_NOTE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcash_shows_contact_link() {
        let widget = payment_widget(PaymentMethod::Gcash, Some("https://m.me/biprepair"));
        assert!(widget.contact_link_visible);
        assert_eq!(widget.contact_href.as_deref(), Some("https://m.me/biprepair"));
        assert_eq!(widget.note, GCASH_NOTE);

        let widget = payment_widget(PaymentMethod::Gcash, Some("  "));
        assert!(widget.contact_link_visible);
        assert_eq!(widget.contact_href, None);
    }

    #[test]
    fn unchecked_radios_mean_cash() {
        let widget = payment_widget(PaymentMethod::from_form_value(None), Some("https://m.me/biprepair"));
        assert!(!widget.contact_link_visible);
        assert_eq!(widget.note, CASH_NOTE);
    }
}
