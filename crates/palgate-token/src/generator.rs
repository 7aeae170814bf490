//! Two-stage token derivation.

use std::time::{SystemTime, UNIX_EPOCH};

use palgate_cipher::{transform, Block, CipherKey, Direction};

use crate::constants::{
    BLOCK_SIZE, KEY_PHONE_OFFSET, KEY_SIZE, MASTER_KEY, PHONE_BYTES, TIMESTAMP_MARKER,
    TIMESTAMP_MARKER_OFFSET, TIMESTAMP_OFFSET, TIMESTAMP_VALUE_OFFSET,
};
use crate::error::TokenError;
use crate::pack::phone_identifier;
use crate::secret::SessionSecret;
use crate::token::Token;
use crate::token_type::TokenType;

/// Derives temporal tokens from a session secret.
///
/// Holds only immutable parameters, so one generator can be shared across
/// threads; every derivation works on fresh buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenGenerator {
    master_key: [u8; KEY_SIZE],
    timestamp_offset: u32,
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self {
            master_key: MASTER_KEY,
            timestamp_offset: TIMESTAMP_OFFSET,
        }
    }
}

impl TokenGenerator {
    /// Creates a generator with the compiled-in protocol constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the master key.
    pub fn with_master_key(mut self, master_key: [u8; KEY_SIZE]) -> Self {
        self.master_key = master_key;
        self
    }

    /// Replaces the timestamp offset.
    pub fn with_timestamp_offset(mut self, offset: u32) -> Self {
        self.timestamp_offset = offset;
        self
    }

    /// Derives the token for `timestamp` (seconds since the Unix epoch).
    pub fn derive(
        &self,
        secret: &SessionSecret,
        phone_number: u64,
        token_type: TokenType,
        timestamp: u32,
    ) -> Token {
        let identifier = phone_identifier(phone_number);
        let intermediate = self.intermediate_key(secret, &identifier);
        let block = self.timestamp_block(timestamp);
        let output = transform(&block, &intermediate, Direction::Reverse);
        Token::assemble(token_type, &identifier, &output)
    }

    /// Derives the token for the current time.
    pub fn derive_now(
        &self,
        secret: &SessionSecret,
        phone_number: u64,
        token_type: TokenType,
    ) -> Token {
        self.derive(secret, phone_number, token_type, current_timestamp())
    }

    /// Stage one: the master key with the phone identifier spliced in, run
    /// forward over the session secret.
    pub fn intermediate_key(
        &self,
        secret: &SessionSecret,
        identifier: &[u8; PHONE_BYTES],
    ) -> CipherKey {
        let mut working = self.master_key;
        working[KEY_PHONE_OFFSET..KEY_PHONE_OFFSET + PHONE_BYTES].copy_from_slice(identifier);
        let out = transform(secret.as_bytes(), &CipherKey::from(working), Direction::Forward);
        CipherKey::from(out)
    }

    /// Stage two input: a zero block carrying the marker and the offset timestamp.
    pub fn timestamp_block(&self, timestamp: u32) -> Block {
        let mut block = [0u8; BLOCK_SIZE];
        block[TIMESTAMP_MARKER_OFFSET..TIMESTAMP_MARKER_OFFSET + 2]
            .copy_from_slice(&TIMESTAMP_MARKER.to_le_bytes());
        let value = timestamp.wrapping_add(self.timestamp_offset);
        block[TIMESTAMP_VALUE_OFFSET..TIMESTAMP_VALUE_OFFSET + 4]
            .copy_from_slice(&value.to_be_bytes());
        block
    }
}

/// Seconds since the Unix epoch, truncated to 32 bits.
pub fn current_timestamp() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as u32)
        .unwrap_or(0)
}

/// Derives the hex token for raw secret bytes.
///
/// The secret length is checked before any cipher work. `None` uses the
/// current time.
pub fn derive_token(
    secret: &[u8],
    phone_number: u64,
    token_type: TokenType,
    timestamp: Option<u32>,
) -> Result<String, TokenError> {
    let secret = SessionSecret::try_from(secret)?;
    let timestamp = timestamp.unwrap_or_else(current_timestamp);
    let token = TokenGenerator::default().derive(&secret, phone_number, token_type, timestamp);
    Ok(token.to_hex())
}
