/// Lowercase, collapse whitespace runs into one space, trim.
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format whole pesos the way `Intl.NumberFormat("en-PH", {currency: "PHP"})` does
/// with zero fraction digits: `₱1,500`. Expects an already rounded, non-negative amount.
pub fn format_php(whole_pesos: f64) -> String {
    format!("\u{20b1}{}", group_thousands(whole_pesos))
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{value:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize("  Google\t  PIXEL \n"), "google pixel");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn php_grouping() {
        assert_eq!(format_php(0.0), "\u{20b1}0");
        assert_eq!(format_php(600.0), "\u{20b1}600");
        assert_eq!(format_php(1500.0), "\u{20b1}1,500");
        assert_eq!(format_php(1_234_567.0), "\u{20b1}1,234,567");
        assert_eq!(format_php(1e20), "\u{20b1}100,000,000,000,000,000,000");
    }
}
