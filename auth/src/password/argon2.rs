use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id v0x13 with a fixed work factor of m = 19456 KiB, t = 2, p = 1
/// and a random 16-byte salt per hash. Output is a PHC string, so every
/// hash carries its own parameters and salt.
///
/// Hashing is deliberately slow. Callers on an async runtime should run
/// [`PasswordHasher::hash`] and [`PasswordHasher::verify`] on a blocking
/// thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Memory cost in KiB.
    pub const MEMORY_COST_KIB: u32 = 19_456;
    /// Number of passes.
    pub const TIME_COST: u32 = 2;
    /// Degree of parallelism.
    pub const PARALLELISM: u32 = 1;

    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher configured with the fixed Argon2id work factor
    pub fn new() -> Self {
        Self
    }

    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(
            Self::MEMORY_COST_KIB,
            Self::TIME_COST,
            Self::PARALLELISM,
            None,
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a plaintext password.
    ///
    /// Two calls with the same input produce different strings because the
    /// salt is random, but both verify against that input.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison inside `argon2` is constant-time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Hash is not a PHC string, is not Argon2id, or carries
    ///   parameters that cannot be used
    /// * `HashingFailed` - Hasher could not be configured
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        if parsed_hash.algorithm != Algorithm::Argon2id.ident() {
            return Err(PasswordError::MalformedHash(format!(
                "unexpected algorithm {}",
                parsed_hash.algorithm
            )));
        }

        match self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}
