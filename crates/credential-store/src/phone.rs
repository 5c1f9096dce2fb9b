//! Phone number canonicalization.

/// Canonical storage form of a phone number.
///
/// Surrounding whitespace and the separators people type between digit
/// groups (spaces, dashes, dots and parentheses) are dropped. Nothing else is
/// validated, so `+123` stays `+123`.
pub fn canonical_phone(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '-' | '.' | '(' | ')'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_phone() {
        assert_eq!(canonical_phone("+14155551234"), "+14155551234");
        assert_eq!(canonical_phone(" +1 (415) 555-1234 "), "+14155551234");
        assert_eq!(canonical_phone("+1.415.555.1234"), "+14155551234");
        assert_eq!(canonical_phone("+123"), "+123");
        assert_eq!(canonical_phone("   "), "");
    }
}
