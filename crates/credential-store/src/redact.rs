//! Log redaction helpers.

use sha2::{Digest, Sha256};

/// Short stable fingerprint of a phone number, safe to put in logs.
pub fn phone_fingerprint(phone: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(phone.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_fingerprint() {
        let a = phone_fingerprint("+14155551234");
        let b = phone_fingerprint("+14155551234");
        let c = phone_fingerprint("+14155550000");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 12);
        assert!(!a.contains("4155551234"));
    }
}
