use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use super::key::SigningKey;

/// Lifetime of every issued token, in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Issues and verifies signed identity tokens.
///
/// Tokens are JWTs signed with HS256 (HMAC with SHA-256) using the
/// process-wide [`SigningKey`]. The service is immutable and can be shared
/// between threads behind an `Arc`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service bound to `key`.
    pub fn new(key: &SigningKey) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm: Algorithm::HS256,
            ttl: Duration::days(TOKEN_TTL_DAYS),
        }
    }

    /// Issue a token asserting `subject`, expiring [`TOKEN_TTL_DAYS`] days from now.
    ///
    /// # Errors
    /// * `EmptySubject` - Subject is empty
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let claims = Claims::for_subject(subject, issued_at, self.ttl);
        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode a token, check its signature and check `now < exp`.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, wrongly signed, expired, or missing claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::InvalidToken)?
            .claims;

        if claims.sub.is_empty() || claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::InvalidToken);
        }

        Ok(claims)
    }
}
