//! Advisory shown under the issue description while the visitor types.

use crate::selection::BrandLock;

/// Board-level work the crew never takes in the field.
pub const BLOCKED_KEYWORDS: [&str; 5] = ["solder", "motherboard", "board level", "logic board", "reball"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceWarning {
    BatteryDeclined,
    BoardLevelDeclined,
}

impl ServiceWarning {
    pub fn message(self) -> &'static str {
        match self {
            ServiceWarning::BatteryDeclined => {
                "We decline iPhone battery cases. Please consider an authorized service center."
            }
            ServiceWarning::BoardLevelDeclined => {
                "Board-level or soldering work is unsafe for field repairs. We cannot accept this job."
            }
        }
    }
}

/// First matching rule wins: battery on the locked device, then blocked keywords.
pub fn evaluate(device: &str, issue_description: &str, lock: &BrandLock) -> Option<ServiceWarning> {
    let issue = issue_description.to_lowercase();

    if lock.applies_to(device) && issue.contains("battery") {
        return Some(ServiceWarning::BatteryDeclined);
    }
    if BLOCKED_KEYWORDS.iter().any(|keyword| issue.contains(keyword)) {
        return Some(ServiceWarning::BoardLevelDeclined);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_on_iphone_declined() {
        let lock = BrandLock::default();
        assert_eq!(
            evaluate("iphone", "Need BATTERY replacement", &lock),
            Some(ServiceWarning::BatteryDeclined)
        );
        assert_eq!(evaluate("android", "need battery replacement", &lock), None);
    }

    #[test]
    fn battery_rule_takes_precedence() {
        let lock = BrandLock::default();
        let issue = "battery swelled, probably needs motherboard solder work";
        assert_eq!(evaluate("iphone", issue, &lock), Some(ServiceWarning::BatteryDeclined));
        assert_eq!(evaluate("android", issue, &lock), Some(ServiceWarning::BoardLevelDeclined));
    }

    #[test]
    fn blocked_keywords_any_device() {
        let lock = BrandLock::default();
        for issue in ["Needs SOLDERING", "board level fix", "logic board dead", "reball the cpu"] {
            assert_eq!(
                evaluate("laptop", issue, &lock),
                Some(ServiceWarning::BoardLevelDeclined),
                "{issue}"
            );
        }
        assert_eq!(evaluate("laptop", "cracked screen", &lock), None);
        assert_eq!(evaluate("laptop", "", &lock), None);
    }
}
