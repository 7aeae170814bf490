//! Token type discriminator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Which class of credential a token represents.
///
/// The numeric codes (0, 1, 2) are what linking responses and credential
/// files carry; the marker byte is what goes on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TokenTypeRepr", into = "u8")]
pub enum TokenType {
    /// Session issued through SMS login.
    Sms = 0,
    /// The phone's own primary session.
    Primary = 1,
    /// A linked secondary device.
    Secondary = 2,
}

impl TokenType {
    /// All token types in code order.
    pub const ALL: [TokenType; 3] = [TokenType::Sms, TokenType::Primary, TokenType::Secondary];

    /// Wire marker placed in byte 0 of the token.
    pub const fn marker(self) -> u8 {
        match self {
            TokenType::Sms => 0x01,
            TokenType::Primary => 0x11,
            TokenType::Secondary => 0x21,
        }
    }

    /// Inverse of [`TokenType::marker`].
    pub fn from_marker(marker: u8) -> Result<Self, TokenError> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.marker() == marker)
            .ok_or(TokenError::UnknownTokenType(marker))
    }

    /// Numeric code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            TokenType::Sms => "sms",
            TokenType::Primary => "primary",
            TokenType::Secondary => "secondary",
        }
    }
}

impl TryFrom<u8> for TokenType {
    type Error = TokenError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TokenType::Sms),
            1 => Ok(TokenType::Primary),
            2 => Ok(TokenType::Secondary),
            other => Err(TokenError::UnknownTokenType(other)),
        }
    }
}

impl From<TokenType> for u8 {
    fn from(ty: TokenType) -> Self {
        ty.code()
    }
}

impl FromStr for TokenType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return TokenType::try_from(code);
        }
        TokenType::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TokenError::UnknownTokenTypeName(s.to_owned()))
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TokenTypeRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<TokenTypeRepr> for TokenType {
    type Error = TokenError;

    fn try_from(repr: TokenTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            TokenTypeRepr::Code(code) => TokenType::try_from(code),
            TokenTypeRepr::Name(name) => name.parse(),
        }
    }
}
