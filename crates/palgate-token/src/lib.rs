//! Temporal token derivation for the PalGate gate-controller API.
//!
//! A token proves possession of a long-lived session secret without sending
//! it. Derivation chains two block transforms:
//! 1. the master key, with the phone identifier spliced in, runs
//!    [`Direction::Forward`](palgate_cipher::Direction) over the session
//!    secret to give an intermediate key;
//! 2. that key runs [`Direction::Reverse`](palgate_cipher::Direction) over a
//!    block carrying the offset timestamp.
//!
//! The result is packed as marker byte, six identifier bytes and the sixteen
//! cipher bytes, then sent as 46 upper-case hex characters.
//!
//! ```
//! use palgate_token::{derive_token, TokenType};
//!
//! let token = derive_token(&[0u8; 16], 123_456_789, TokenType::Primary, Some(1_700_000_000))?;
//! assert_eq!(token, "110000075BCD1503AB5A42CBD8FC3CA5B6BC037F6FC105");
//! # Ok::<(), palgate_token::TokenError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod constants;
mod error;
mod generator;
mod pack;
mod secret;
mod token;
mod token_type;

pub use crate::error::TokenError;
pub use crate::generator::{current_timestamp, derive_token, TokenGenerator};
pub use crate::pack::{phone_from_identifier, phone_identifier};
pub use crate::secret::SessionSecret;
pub use crate::token::Token;
pub use crate::token_type::TokenType;
