//! Opaque session and API tokens.

use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of random bytes in a freshly issued token.
pub const TOKEN_BYTES: usize = 32;

/// An opaque bearer token.
///
/// `Debug` is redacted so tokens never reach logs by accident.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Issues a new unguessable token: 32 random bytes, hex encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Wraps a token presented by a caller. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SHA-256 hex digest, the form API tokens are persisted in.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_yields_64_hex_chars() {
        let token = SessionToken::generate();
        assert_eq!(token.as_str().len(), TOKEN_BYTES * 2);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generate_is_not_repeated() {
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }

    #[test]
    fn parse_trims_and_rejects_blank() {
        assert_eq!(SessionToken::parse("  abc ").unwrap().as_str(), "abc");
        assert!(SessionToken::parse("   ").is_none());
    }

    #[test]
    fn digest_is_sha256_hex() {
        let token = SessionToken::parse("abc").unwrap();
        assert_eq!(
            token.digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn debug_does_not_leak_token() {
        let token = SessionToken::parse("secret-value").unwrap();
        assert!(!format!("{:?}", token).contains("secret"));
    }
}
