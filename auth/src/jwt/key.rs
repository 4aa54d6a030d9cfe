use std::fmt;

use super::errors::TokenError;

/// Process-wide HMAC secret.
///
/// Built once from configuration at startup and never mutated afterwards.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wrap a secret.
    ///
    /// HS256 wants at least 32 bytes; shorter secrets are accepted but weak.
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has no bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert_eq!(SigningKey::new(Vec::new()).unwrap_err(), TokenError::EmptySecret);
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = SigningKey::new("super-secret").unwrap();
        assert!(!format!("{:?}", key).contains("super-secret"));
    }
}
