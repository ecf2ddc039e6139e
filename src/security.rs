//! Shared-password check for the admin endpoints

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compare a provided password with the configured one in constant time.
///
/// Both sides are hashed first so the comparison does not leak the length of
/// the configured password.
pub fn password_matches(expected: &str, provided: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let provided = Sha256::digest(provided.as_bytes());
    expected.as_slice().ct_eq(provided.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_matches() {
        assert!(password_matches("kasu-2025", "kasu-2025"));
        assert!(!password_matches("kasu-2025", "kasu-2024"));
        assert!(!password_matches("kasu-2025", ""));
    }
}
