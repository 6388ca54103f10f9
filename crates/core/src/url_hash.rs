//! One-way hashing of picture URLs.
//!
//! URLs are stored the way passwords usually are: Argon2id with a random
//! salt, serialized as a PHC string. The cost parameters are fixed and
//! deliberately low; the hash identifies a URL, it does not protect a
//! credential.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::CoreError;

/// Memory cost in KiB.
const MEMORY_COST_KIB: u32 = 4096;
/// Number of passes.
const TIME_COST: u32 = 1;
/// Degree of parallelism.
const PARALLELISM: u32 = 1;

fn hasher() -> Result<Argon2<'static>, CoreError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(|e| CoreError::Internal(format!("Invalid Argon2 parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a plaintext URL, returning the PHC-formatted hash string.
pub fn hash_url(url: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(url.as_bytes(), &salt)
        .map_err(|e| CoreError::Internal(format!("URL hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext URL against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch. Only a malformed stored hash is an error.
pub fn verify_url(url: &str, hash: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| CoreError::Internal(format!("Malformed stored URL hash: {e}")))?;
    // The PHC string carries its own parameters, so any Argon2 instance verifies it.
    match Argon2::default().verify_password(url.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CoreError::Internal(format!(
            "URL hash verification failed: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_url("http://x/1.png").expect("hashing should succeed");

        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(!hash.contains("http://x/1.png"));
        assert!(verify_url("http://x/1.png", &hash).unwrap());
    }

    #[test]
    fn other_url_does_not_verify() {
        let hash = hash_url("http://x/1.png").unwrap();
        assert!(!verify_url("http://x/2.png", &hash).unwrap());
        assert!(!verify_url("", &hash).unwrap());
    }

    #[test]
    fn same_url_hashes_differently() {
        // Random salt per call.
        let a = hash_url("http://x/1.png").unwrap();
        let b = hash_url("http://x/1.png").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn uses_fixed_low_cost() {
        let hash = hash_url("http://x/1.png").unwrap();
        assert!(hash.contains("m=4096,t=1,p=1"), "unexpected params in {hash}");
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert_matches!(
            verify_url("http://x/1.png", "not-a-phc-string"),
            Err(CoreError::Internal(_))
        );
    }
}
