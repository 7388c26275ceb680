//! Salted, iterated hashing of API key secrets.
//!
//! Stored format: `pbkdf2_sha256$<iterations>$<salt>$<base64 digest>`.
//! The iteration count and salt travel with the hash, so a key issued under
//! an older iteration count keeps verifying after the configured count changes.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use rand::Rng;
use secrecy::SecretString;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{AppError, AppResult};

/// Algorithm identifier, first field of every stored hash.
pub const ALGORITHM: &str = "pbkdf2_sha256";
/// Default PBKDF2 iteration count for newly issued keys.
pub const DEFAULT_ITERATIONS: u32 = 216_000;
/// Field separator in the stored hash.
const SEPARATOR: char = '$';
/// Bytes of entropy in a generated salt.
const SALT_BYTES: usize = 16;
/// Length of a generated API key secret.
pub const SECRET_LENGTH: usize = 32;
/// Length of the derived key.
const DIGEST_LENGTH: usize = 32;

/// PBKDF2-HMAC-SHA256 credential hasher.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    iterations: u32,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl CredentialHasher {
    /// Create a hasher that encodes with `iterations` rounds (minimum 1).
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash `secret` with `salt` using the configured iteration count.
    pub fn encode(&self, secret: &str, salt: &str) -> AppResult<String> {
        if salt.is_empty() || salt.contains(SEPARATOR) {
            return Err(AppError::InvalidInput(
                "salt must be non-empty and must not contain '$'".to_string(),
            ));
        }

        let digest = derive(secret, salt, self.iterations);
        Ok(format!(
            "{ALGORITHM}{SEPARATOR}{}{SEPARATOR}{salt}{SEPARATOR}{}",
            self.iterations,
            STANDARD.encode(digest)
        ))
    }

    /// Check `secret` against a stored hash.
    ///
    /// Uses the salt and iteration count embedded in `stored`. Every kind of
    /// malformed input is reported as a plain mismatch.
    pub fn verify(&self, secret: &str, stored: &str) -> bool {
        let Some(parsed) = StoredHash::parse(stored) else {
            return false;
        };

        let digest = derive(secret, parsed.salt, parsed.iterations);
        digest.as_slice().ct_eq(parsed.digest.as_slice()).into()
    }

    /// Generate a random salt: 16 bytes, URL-safe base64 without padding.
    pub fn generate_salt() -> String {
        let bytes: [u8; SALT_BYTES] = rand::random();
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Generate a random alphanumeric API key secret.
    pub fn generate_secret() -> SecretString {
        let secret: String = rand::rng()
            .sample_iter(&rand::distr::Alphanumeric)
            .take(SECRET_LENGTH)
            .map(char::from)
            .collect();
        SecretString::from(secret)
    }
}

fn derive(secret: &str, salt: &str, iterations: u32) -> [u8; DIGEST_LENGTH] {
    let mut out = [0u8; DIGEST_LENGTH];
    pbkdf2::pbkdf2_hmac::<Sha256>(secret.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}

/// Decoded fields of a stored hash.
struct StoredHash<'a> {
    iterations: u32,
    salt: &'a str,
    digest: Vec<u8>,
}

impl<'a> StoredHash<'a> {
    fn parse(stored: &'a str) -> Option<Self> {
        let mut parts = stored.split(SEPARATOR);
        let algorithm = parts.next()?;
        let iterations = parts.next()?;
        let salt = parts.next()?;
        let digest = parts.next()?;
        if parts.next().is_some() || algorithm != ALGORITHM || salt.is_empty() {
            return None;
        }

        let iterations = iterations.parse::<u32>().ok().filter(|n| *n > 0)?;
        let digest = STANDARD.decode(digest).ok()?;
        if digest.len() != DIGEST_LENGTH {
            return None;
        }

        Some(Self {
            iterations,
            salt,
            digest,
        })
    }
}
