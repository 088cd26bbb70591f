//! Fingerprint Value Object
//!
//! A fixed-length SHA-256 digest of raw schema bytes. Fingerprint equality is
//! the only equality test the sync protocol performs; collisions are an
//! accepted risk.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::error::SchemaSyncError;

/// Fingerprint value object
///
/// Holds the lowercase hex encoding of a SHA-256 digest (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Optional prefix accepted when parsing
    pub const PREFIX: &'static str = "sha256:";

    /// Number of hex characters in a fingerprint
    pub const HEX_LEN: usize = 64;

    /// Compute the fingerprint of raw bytes
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(format!("{:x}", digest))
    }

    /// Parse a stored fingerprint, tolerating surrounding whitespace,
    /// an optional `sha256:` prefix and uppercase digits.
    pub fn parse(s: &str) -> Result<Self, SchemaSyncError> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix(Self::PREFIX).unwrap_or(trimmed);

        if hex.len() != Self::HEX_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SchemaSyncError::InvalidFingerprint {
                value: trimmed.to_string(),
            });
        }

        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// Get the hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = SchemaSyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
