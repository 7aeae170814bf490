//! AES-128 block engine used to derive PalGate temporal tokens.
//!
//! The engine exposes the two single-block procedures the token protocol is
//! built from, each walking its own in-place key schedule:
//! - [`Direction::Forward`] runs the inverse cipher, starting from the last
//!   round key.
//! - [`Direction::Reverse`] runs the forward cipher, starting from the
//!   supplied key.
//!
//! Lookup tables are plain constants. The implementation favours clarity over
//! constant-time guarantees and should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_SIZE};
pub use crate::cipher::{transform, transform_slices, Direction};
pub use crate::error::CipherError;
pub use crate::key::{CipherKey, KEY_SIZE, ROUNDS};
pub use crate::sbox::{xtime, INV_SBOX, RCON, SBOX};
