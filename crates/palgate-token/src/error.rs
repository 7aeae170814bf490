//! Error type for token derivation and parsing.

use palgate_cipher::CipherError;
use thiserror::Error;

use crate::constants::{BLOCK_SIZE, TOKEN_SIZE};

/// Errors produced while deriving or decoding a token.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenError {
    /// The session secret was not exactly one block long.
    #[error("session secret must be {} bytes, got {got}", BLOCK_SIZE)]
    InvalidSecretLength {
        /// Supplied length.
        got: usize,
    },
    /// Numeric token type or marker byte outside the known set.
    #[error("unknown token type: {0}")]
    UnknownTokenType(u8),
    /// Token type name that is neither a known name nor a numeric code.
    #[error("unknown token type: {0:?}")]
    UnknownTokenTypeName(String),
    /// Input that should have been hex was not.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// Decoded token of the wrong size.
    #[error("token must be {} bytes, got {got}", TOKEN_SIZE)]
    InvalidTokenLength {
        /// Decoded length.
        got: usize,
    },
    /// The block engine rejected its input.
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

impl TokenError {
    /// Whether the error comes from bad input shape rather than an unknown enum value.
    pub fn is_input_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSecretLength { .. }
                | Self::InvalidHex(_)
                | Self::InvalidTokenLength { .. }
                | Self::Cipher(_)
        )
    }
}
