//! The assembled token buffer.

use std::fmt;
use std::str::FromStr;

use crate::constants::{BLOCK_SIZE, PHONE_BYTES, TOKEN_SIZE};
use crate::error::TokenError;
use crate::pack::phone_from_identifier;
use crate::token_type::TokenType;

const IDENT_START: usize = 1;
const CIPHER_START: usize = IDENT_START + PHONE_BYTES;

/// A 23-byte temporal token: marker, phone identifier, cipher output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    token_type: TokenType,
    bytes: [u8; TOKEN_SIZE],
}

impl Token {
    pub(crate) fn assemble(
        token_type: TokenType,
        identifier: &[u8; PHONE_BYTES],
        cipher_output: &[u8; BLOCK_SIZE],
    ) -> Self {
        let mut bytes = [0u8; TOKEN_SIZE];
        bytes[0] = token_type.marker();
        bytes[IDENT_START..CIPHER_START].copy_from_slice(identifier);
        bytes[CIPHER_START..].copy_from_slice(cipher_output);
        Self { token_type, bytes }
    }

    /// Decodes a hex token, checking length and marker.
    pub fn from_hex(hex_str: &str) -> Result<Self, TokenError> {
        let bytes = hex::decode(hex_str.trim())?;
        let bytes: [u8; TOKEN_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| TokenError::InvalidTokenLength { got: bytes.len() })?;
        let token_type = TokenType::from_marker(bytes[0])?;
        Ok(Self { token_type, bytes })
    }

    /// Token type recovered from the marker byte.
    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// The six phone identifier bytes.
    pub fn identifier(&self) -> [u8; PHONE_BYTES] {
        let mut out = [0u8; PHONE_BYTES];
        out.copy_from_slice(&self.bytes[IDENT_START..CIPHER_START]);
        out
    }

    /// Phone number as far as six bytes can carry it.
    pub fn phone_number(&self) -> u64 {
        phone_from_identifier(&self.identifier())
    }

    /// Second-stage cipher output.
    pub fn cipher_output(&self) -> [u8; BLOCK_SIZE] {
        let mut out = [0u8; BLOCK_SIZE];
        out.copy_from_slice(&self.bytes[CIPHER_START..]);
        out
    }

    /// Raw token bytes.
    pub fn as_bytes(&self) -> &[u8; TOKEN_SIZE] {
        &self.bytes
    }

    /// Upper-case hex form sent as the request credential.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.bytes)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::from_hex(s)
    }
}
