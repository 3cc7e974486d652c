//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Tunable work factor (memory, iterations, parallelism)
//! - Random salt embedded in the PHC output, no separate salt storage
//! - Zeroization of clear text
//! - Constant-time comparison (delegated to the argon2 verifier)
//! - Optional pepper

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Maximum password length in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParams(String),
}

// ============================================================================
// Work factor
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashParams {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashParams {
    /// Smallest parameters argon2 accepts. Tests only; never in production.
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn to_argon2(self) -> Result<Params, PasswordHashError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Does not implement `Clone`
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password
    ///
    /// Unicode is normalized using NFKC before validation, so the same
    /// password typed on different keyboards hashes identically.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();
        let normalized = Self(normalized);

        if normalized.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.0.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters except space, tab, newline
        if normalized
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(normalized)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Password bytes with the pepper appended
    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut combined = Zeroizing::new(self.as_bytes().to_vec());
        if let Some(p) = pepper {
            combined.extend_from_slice(p);
        }
        combined
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries algorithm, version, parameters, salt and digest:
/// `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    pub fn into_phc_string(self) -> String {
        self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id hasher bound to a work factor and an optional pepper
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
    pepper: Option<Zeroizing<Vec<u8>>>,
}

impl Argon2Hasher {
    pub fn new(params: HashParams, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.to_argon2()?);

        Ok(Self {
            argon2,
            pepper: pepper.map(|p| Zeroizing::new(p.to_vec())),
        })
    }

    /// Hash with a fresh 128-bit random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let bytes = password.peppered(self.pepper());
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(&bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Hash of 32 random bytes that no caller knows
    ///
    /// Verifying against it costs the same as verifying against a real
    /// account's hash made under the same parameters.
    pub fn decoy_hash(&self) -> Result<HashedPassword, PasswordHashError> {
        let mut secret = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(secret.as_mut());
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(secret.as_ref(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Verify a password against a stored PHC string
    ///
    /// Returns `false` both for a mismatch and for a stored value that is not
    /// a valid PHC string. The cost parameters are read from the stored hash,
    /// so hashes made under an older work factor still verify.
    pub fn verify(&self, stored: &str, password: &ClearTextPassword) -> bool {
        let parsed = match PasswordHash::new(stored) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let bytes = password.peppered(self.pepper());

        self.argon2.verify_password(&bytes, &parsed).is_ok()
    }

    /// Whether a stored hash was produced with a different algorithm
    pub fn needs_rehash(&self, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => parsed.algorithm != Algorithm::Argon2id.ident(),
            Err(_) => true,
        }
    }

    fn pepper(&self) -> Option<&[u8]> {
        self.pepper.as_ref().map(|p| p.as_slice())
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::new(HashParams::minimal(), None).unwrap()
    }

    fn password(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new("".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("   \t ".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));

        assert!(ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH)).is_ok());
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("abc\u{0007}def".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        assert!(ClearTextPassword::new("test@123".to_string()).is_ok());
        assert!(ClearTextPassword::new("x".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hashed = hasher.hash(&password("test@123")).unwrap();

        assert_ne!(hashed.as_phc_string(), "test@123");
        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hasher.verify(hashed.as_phc_string(), &password("test@123")));
        assert!(!hasher.verify(hashed.as_phc_string(), &password("test@124")));
    }

    #[test]
    fn test_salt_is_random() {
        let hasher = hasher();
        let a = hasher.hash(&password("same password")).unwrap();
        let b = hasher.hash(&password("same password")).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = hasher();
        assert!(!hasher.verify("", &password("test@123")));
        assert!(!hasher.verify("not_a_valid_hash", &password("test@123")));
        assert!(!hasher.verify("$argon2id$v=19$garbage", &password("test@123")));
    }

    #[test]
    fn test_verify_uses_stored_params() {
        let strong = Argon2Hasher::new(
            HashParams {
                memory_kib: 64,
                iterations: 2,
                parallelism: 1,
            },
            None,
        )
        .unwrap();
        let hashed = strong.hash(&password("test@123")).unwrap();

        assert!(hasher().verify(hashed.as_phc_string(), &password("test@123")));
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = Argon2Hasher::new(HashParams::minimal(), Some(b"pepper")).unwrap();
        let hashed = peppered.hash(&password("test@123")).unwrap();

        assert!(peppered.verify(hashed.as_phc_string(), &password("test@123")));
        assert!(!hasher().verify(hashed.as_phc_string(), &password("test@123")));

        let wrong = Argon2Hasher::new(HashParams::minimal(), Some(b"other")).unwrap();
        assert!(!wrong.verify(hashed.as_phc_string(), &password("test@123")));
    }

    #[test]
    fn test_nfkc_normalization() {
        let hasher = hasher();
        // Fullwidth "Ａ" normalizes to "A"
        let hashed = hasher.hash(&password("\u{FF21}bc")).unwrap();
        assert!(hasher.verify(hashed.as_phc_string(), &password("Abc")));
    }

    #[test]
    fn test_invalid_params() {
        let result = Argon2Hasher::new(
            HashParams {
                memory_kib: 1,
                iterations: 1,
                parallelism: 1,
            },
            None,
        );
        assert!(matches!(result, Err(PasswordHashError::InvalidParams(_))));
    }

    #[test]
    fn test_decoy_hash_uses_configured_params() {
        let hasher = Argon2Hasher::new(
            HashParams {
                memory_kib: 4096,
                iterations: 3,
                parallelism: 1,
            },
            None,
        )
        .unwrap();
        let decoy = hasher.decoy_hash().unwrap();

        assert!(decoy.as_phc_string().starts_with("$argon2id$v=19$m=4096,t=3,p=1$"));
        assert!(!hasher.needs_rehash(decoy.as_phc_string()));
        assert!(!hasher.verify(decoy.as_phc_string(), &password("test@123")));
        assert_ne!(decoy, hasher.decoy_hash().unwrap());
    }

    #[test]
    fn test_needs_rehash() {
        let hasher = hasher();
        let hashed = hasher.hash(&password("test@123")).unwrap();
        assert!(!hasher.needs_rehash(hashed.as_phc_string()));
        assert!(hasher.needs_rehash("garbage"));
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", password("secret"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = hasher().hash(&password("secret")).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
