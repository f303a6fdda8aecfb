#![deny(unsafe_code)]

use redi_model::Literal;
use sha2::Digest;

/// Salt used when no other salt is configured.
pub const DEFAULT_HASH_SALT: &str = "redi_platform_2026";

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// De-identifies person-level keys with a salted SHA-256.
///
/// The same identifier always hashes to the same value under one salt, so
/// hashed keys still join within a dataset.
#[derive(Debug, Clone)]
pub struct IdentifierHasher {
    salt: String,
}

impl Default for IdentifierHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_SALT)
    }
}

impl IdentifierHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Lowercase hex digest of `"{salt}:{identifier}"`.
    pub fn digest(&self, identifier: &str) -> String {
        sha256_hex(format!("{}:{}", self.salt, identifier).as_bytes())
    }

    /// Blank or absent identifiers hash to NULL.
    pub fn hash(&self, raw: Option<&str>) -> Literal {
        match raw {
            Some(identifier) if !identifier.trim().is_empty() => {
                Literal::Text(self.digest(identifier))
            }
            _ => Literal::Null,
        }
    }
}
