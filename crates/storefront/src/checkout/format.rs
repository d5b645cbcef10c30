//! Input formatting for card fields.
//!
//! These are formatters, not validators: they normalize whatever the shopper
//! typed into the display shape and never reject input. Both are idempotent.

/// Separator between expiry month and year.
pub const EXPIRY_SEPARATOR: &str = " / ";

/// Digits of a card number, in groups of four separated by single spaces.
///
/// Every non-digit character is dropped first, so pasting a number with
/// dashes or stray spaces yields the canonical shape.
///
/// ```
/// use storefront_checkout::checkout::format_card_number;
///
/// assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
/// assert_eq!(format_card_number("4111-1111-11"), "4111 1111 11");
/// ```
#[must_use]
pub fn format_card_number(raw: &str) -> String {
    let digits = digits(raw);
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(c);
    }
    formatted
}

/// Card expiry as `MM / YY`.
///
/// Keeps at most four digits; once more than two are present the month and
/// the year fragment are separated by [`EXPIRY_SEPARATOR`].
///
/// ```
/// use storefront_checkout::checkout::format_card_expiry;
///
/// assert_eq!(format_card_expiry("1225"), "12 / 25");
/// assert_eq!(format_card_expiry("123456"), "12 / 34");
/// assert_eq!(format_card_expiry("1"), "1");
/// ```
#[must_use]
pub fn format_card_expiry(raw: &str) -> String {
    let digits: String = digits(raw).chars().take(4).collect();
    if digits.len() > 2 {
        let (month, year) = digits.split_at(2);
        format!("{month}{EXPIRY_SEPARATOR}{year}")
    } else {
        digits
    }
}

/// Split a formatted expiry into `(month, year)`.
///
/// Returns `None` unless the value holds a full two-digit month and
/// two-digit year.
#[must_use]
pub fn split_expiry(formatted: &str) -> Option<(String, String)> {
    let digits = digits(formatted);
    if digits.len() != 4 {
        return None;
    }
    let (month, year) = digits.split_at(2);
    Some((month.to_string(), year.to_string()))
}

/// ASCII digits of `raw`, in order.
#[must_use]
pub fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number_groups() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("378282246310005"), "3782 8224 6310 005");
        assert_eq!(format_card_number("1234"), "1234");
        assert_eq!(format_card_number("12345"), "1234 5");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_card_number_strips_noise() {
        assert_eq!(format_card_number(" 4111\t1111-1111 abc1111 "), "4111 1111 1111 1111");
        assert_eq!(format_card_number("４１"), "");
    }

    #[test]
    fn test_card_number_does_not_enforce_length() {
        assert_eq!(
            format_card_number("12345678901234567890123"),
            "1234 5678 9012 3456 7890 123"
        );
    }

    #[test]
    fn test_card_number_idempotent() {
        for raw in ["4111111111111111", "4111 1111 1111 1111", "41 11 1", "x"] {
            let once = format_card_number(raw);
            assert_eq!(format_card_number(&once), once);
        }
    }

    #[test]
    fn test_expiry_formatting() {
        assert_eq!(format_card_expiry("1225"), "12 / 25");
        assert_eq!(format_card_expiry("123456"), "12 / 34");
        assert_eq!(format_card_expiry("12"), "12");
        assert_eq!(format_card_expiry("123"), "12 / 3");
        assert_eq!(format_card_expiry("12/25"), "12 / 25");
        assert_eq!(format_card_expiry("ab"), "");
    }

    #[test]
    fn test_expiry_idempotent() {
        for raw in ["1225", "123456", "1", "123", "12 / 2"] {
            let once = format_card_expiry(raw);
            assert_eq!(format_card_expiry(&once), once);
        }
    }

    #[test]
    fn test_split_expiry() {
        assert_eq!(
            split_expiry("12 / 25"),
            Some(("12".to_string(), "25".to_string()))
        );
        assert_eq!(split_expiry("12 / 2"), None);
        assert_eq!(split_expiry(""), None);
    }
}
