//! Credential primitives library
//!
//! Provides the building blocks for issuing credentials:
//! - Password hashing (Argon2id, fixed work factor)
//! - Signed identity tokens (JWT, HS256, seven day lifetime)
//!
//! Nothing here knows about users or storage. The identity service composes
//! these pieces into its signup and login workflows.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Password123").unwrap();
//! assert!(hasher.verify("Password123", &hash).unwrap());
//! assert!(!hasher.verify("Password124", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningKey, TokenService};
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let tokens = TokenService::new(&key);
//! let token = tokens.issue("test@example.com").unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.sub, "test@example.com");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::SigningKey;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use jwt::TOKEN_TTL_DAYS;
pub use password::PasswordError;
pub use password::PasswordHasher;
