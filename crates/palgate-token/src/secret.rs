//! Long-lived session secret.

use std::fmt;

use crate::constants::BLOCK_SIZE;
use crate::error::TokenError;

/// A validated 16-byte session secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSecret([u8; BLOCK_SIZE]);

impl SessionSecret {
    /// Parses the hex form stored in credential files.
    pub fn from_hex(hex_str: &str) -> Result<Self, TokenError> {
        let bytes = hex::decode(hex_str.trim())?;
        Self::try_from(bytes.as_slice())
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }
}

impl From<[u8; BLOCK_SIZE]> for SessionSecret {
    fn from(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for SessionSecret {
    type Error = TokenError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let secret = bytes
            .try_into()
            .map_err(|_| TokenError::InvalidSecretLength { got: bytes.len() })?;
        Ok(Self(secret))
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(..)")
    }
}
