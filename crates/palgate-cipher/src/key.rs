//! Cipher keys and the in-place key-schedule walk.

use crate::error::CipherError;
use crate::sbox::{sbox, RCON};

/// Key length in bytes.
pub const KEY_SIZE: usize = 16;

/// Number of schedule steps (and rounds) for a 128-bit key.
pub const ROUNDS: usize = 10;

/// 128-bit cipher key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CipherKey(pub [u8; KEY_SIZE]);

impl From<[u8; KEY_SIZE]> for CipherKey {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for CipherKey {
    type Error = CipherError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| CipherError::InvalidLength {
            what: "key",
            expected: KEY_SIZE,
            got: bytes.len(),
        })?;
        Ok(Self(key))
    }
}

impl AsRef<[u8]> for CipherKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Working copy of a key that walks the schedule one round at a time.
///
/// Only the current round key is held. Stepping forward derives round `r + 1`
/// from round `r`; stepping back undoes exactly one forward step, so a walk to
/// round ten and back lands on the original key.
#[derive(Clone)]
pub(crate) struct KeySchedule {
    words: [u8; KEY_SIZE],
}

impl KeySchedule {
    pub(crate) fn new(key: &CipherKey) -> Self {
        Self { words: key.0 }
    }

    /// The round key at the current position.
    #[inline]
    pub(crate) fn round_key(&self) -> &[u8; KEY_SIZE] {
        &self.words
    }

    /// Moves from round key `step` to round key `step + 1`.
    pub(crate) fn advance(&mut self, step: usize) {
        self.mix_first_word(RCON[step]);
        for i in 4..KEY_SIZE {
            self.words[i] ^= self.words[i - 4];
        }
    }

    /// Moves from round key `step + 1` back to round key `step`.
    pub(crate) fn retreat(&mut self, step: usize) {
        for i in (4..KEY_SIZE).rev() {
            self.words[i] ^= self.words[i - 4];
        }
        self.mix_first_word(RCON[step]);
    }

    /// Advances through every step, leaving the final round key in place.
    pub(crate) fn advance_to_end(&mut self) {
        for step in 0..ROUNDS {
            self.advance(step);
        }
    }

    // RotWord + SubWord of the last column, folded into the first.
    fn mix_first_word(&mut self, rcon: u8) {
        let w = &mut self.words;
        w[0] ^= sbox(w[13]) ^ rcon;
        w[1] ^= sbox(w[14]);
        w[2] ^= sbox(w[15]);
        w[3] ^= sbox(w[12]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIPS_KEY: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f,
        0x3c,
    ];

    #[test]
    fn first_step_matches_fips_expansion() {
        let mut schedule = KeySchedule::new(&CipherKey::from(FIPS_KEY));
        schedule.advance(0);
        assert_eq!(
            schedule.round_key(),
            &[
                0xa0, 0xfa, 0xfe, 0x17, 0x88, 0x54, 0x2c, 0xb1, 0x23, 0xa3, 0x39, 0x39, 0x2a, 0x6c,
                0x76, 0x05
            ]
        );
    }

    #[test]
    fn last_round_key_matches_fips_expansion() {
        let mut schedule = KeySchedule::new(&CipherKey::from(FIPS_KEY));
        schedule.advance_to_end();
        assert_eq!(
            schedule.round_key(),
            &[
                0xd0, 0x14, 0xf9, 0xa8, 0xc9, 0xee, 0x25, 0x89, 0xe1, 0x3f, 0x0c, 0xc8, 0xb6, 0x63,
                0x0c, 0xa6
            ]
        );
    }

    #[test]
    fn retreat_undoes_advance() {
        let key = CipherKey::from(FIPS_KEY);
        let mut schedule = KeySchedule::new(&key);
        schedule.advance_to_end();
        for step in (0..ROUNDS).rev() {
            schedule.retreat(step);
        }
        assert_eq!(schedule.round_key(), &key.0);
    }

    #[test]
    fn key_from_short_slice_is_rejected() {
        let err = CipherKey::try_from(&[0u8; 15][..]).unwrap_err();
        assert_eq!(
            err,
            CipherError::InvalidLength {
                what: "key",
                expected: 16,
                got: 15
            }
        );
    }
}
