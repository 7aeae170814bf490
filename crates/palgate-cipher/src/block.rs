//! Block representation helpers.

use crate::error::CipherError;

/// Block length in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Cipher block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// XORs `rhs` into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Copies a slice into a block, rejecting anything that is not exactly 16 bytes.
pub fn block_from_slice(bytes: &[u8]) -> Result<Block, CipherError> {
    bytes.try_into().map_err(|_| CipherError::InvalidLength {
        what: "block",
        expected: BLOCK_SIZE,
        got: bytes.len(),
    })
}
