/**
 * Password Hashing and Strength Rules
 *
 * Wraps bcrypt for credential storage. Hashes embed a per-call random
 * salt, so hashing the same password twice yields different digests
 * and comparison must always go through `verify_password`.
 *
 * Bcrypt at production cost takes tens to hundreds of milliseconds of
 * pure CPU, long enough to stall the async executor. The `_async`
 * variants move that work onto the tokio blocking pool and are the
 * only entry points the request handlers use.
 */
use bcrypt::{hash, verify, BcryptError};
use thiserror::Error;

/// Failures while hashing or checking a password.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Bcrypt(#[from] BcryptError),

    /// The blocking-pool task was cancelled or panicked.
    #[error("password hashing task was interrupted")]
    Interrupted,
}

/// Hashes a plaintext password with bcrypt at the given cost factor.
///
/// Each call salts independently, so the digest is never a stable
/// function of the password.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(hash(password, cost)?)
}

/// Checks a plaintext password against a stored bcrypt digest.
///
/// Returns `Ok(false)` on a mismatch. `Err` means the digest itself
/// was unusable, not that the password was wrong.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, PasswordError> {
    Ok(verify(password, digest)?)
}

/// Hashes on the tokio blocking pool.
pub async fn hash_password_async(password: String, cost: u32) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|_| PasswordError::Interrupted)?
}

/// Verifies on the tokio blocking pool.
pub async fn verify_password_async(password: String, digest: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .map_err(|_| PasswordError::Interrupted)?
}

/// Checks the signup password policy: at least 8 characters, with at
/// least one letter and at least one digit.
///
/// Returns the first rule the password breaks, as a message suitable
/// for the validation error body.
pub fn validate_password_strength(password: &str) -> Result<(), &'static str> {
    // Length is measured in characters, not bytes, like the name rule.
    if password.chars().count() < 8 {
        return Err("password must be at least 8 characters");
    }

    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("password must contain at least one letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("password must contain at least one digit");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the hashing tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_then_verify_succeeds() {
        let digest = hash_password("hunter2abc1", TEST_COST).unwrap();
        assert!(verify_password("hunter2abc1", &digest).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let digest = hash_password("correct1horse", TEST_COST).unwrap();
        assert!(!verify_password("wrong1horse", &digest).unwrap());
    }

    #[test]
    fn test_same_password_hashes_to_different_digests() {
        let first = hash_password("repeatable1pw", TEST_COST).unwrap();
        let second = hash_password("repeatable1pw", TEST_COST).unwrap();
        assert_ne!(first, second);
        assert!(verify_password("repeatable1pw", &first).unwrap());
        assert!(verify_password("repeatable1pw", &second).unwrap());
    }

    #[tokio::test]
    async fn test_async_variants_round_trip() {
        let digest = hash_password_async("async1password".to_string(), TEST_COST)
            .await
            .unwrap();
        let ok = verify_password_async("async1password".to_string(), digest)
            .await
            .unwrap();
        assert!(ok);
    }

    #[test]
    fn test_strength_rejects_short_password() {
        assert!(validate_password_strength("a1b2c3").is_err());
    }

    #[test]
    fn test_strength_counts_characters_not_bytes() {
        // Seven characters spanning eight bytes: still too short.
        let short = "pässw0r";
        assert_eq!(short.chars().count(), 7);
        assert_eq!(short.len(), 8);
        assert!(validate_password_strength(short).is_err());

        // Eight characters pass regardless of their byte count.
        assert!(validate_password_strength("pässw0rd").is_ok());
    }

    #[test]
    fn test_strength_rejects_password_without_digit() {
        assert!(validate_password_strength("onlyletters").is_err());
    }

    #[test]
    fn test_strength_rejects_password_without_letter() {
        assert!(validate_password_strength("1234567890").is_err());
    }

    #[test]
    fn test_strength_accepts_mixed_password() {
        assert!(validate_password_strength("passw0rd").is_ok());
        assert!(validate_password_strength("longer password 9").is_ok());
    }
}
