/// Submit button state behind the booking-policy checkbox.
///
/// The disabled state is carried three ways (property/attribute, `aria-disabled`, style
/// class) and all three always come from the same flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitGate {
    enabled: bool,
}

impl SubmitGate {
    pub fn from_consent(checked: bool) -> Self {
        Self { enabled: checked }
    }

    pub fn disabled(self) -> bool {
        !self.enabled
    }

    pub fn aria_disabled(self) -> &'static str {
        if self.enabled { "false" } else { "true" }
    }

    /// `(class, present)` pairs to toggle on the button.
    pub fn classes(self) -> [(&'static str, bool); 2] {
        [("btn--disabled", !self.enabled), ("btn--ready", self.enabled)]
    }
}
