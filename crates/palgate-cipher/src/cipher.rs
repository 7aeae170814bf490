//! The two single-block procedures and their entry points.

use crate::block::{block_from_slice, Block};
use crate::error::CipherError;
use crate::key::{CipherKey, KeySchedule, ROUNDS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};

/// Which of the two block procedures to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Walks the schedule to its last round key, then unwinds it while
    /// applying inverse rounds (the FIPS-197 inverse cipher).
    Forward,
    /// Applies forward rounds while walking the schedule up from the
    /// supplied key (the FIPS-197 cipher).
    Reverse,
}

/// Transforms one block under `key` in the requested direction.
///
/// The key is copied into a private schedule buffer; the caller's key is
/// never touched.
pub fn transform(block: &Block, key: &CipherKey, direction: Direction) -> Block {
    let mut schedule = KeySchedule::new(key);
    match direction {
        Direction::Forward => forward(*block, &mut schedule),
        Direction::Reverse => reverse(*block, &mut schedule),
    }
}

/// Slice front end for [`transform`], checking both lengths first.
pub fn transform_slices(
    block: &[u8],
    key: &[u8],
    direction: Direction,
) -> Result<Block, CipherError> {
    let block = block_from_slice(block)?;
    let key = CipherKey::try_from(key)?;
    Ok(transform(&block, &key, direction))
}

fn forward(mut state: Block, schedule: &mut KeySchedule) -> Block {
    schedule.advance_to_end();
    add_round_key(&mut state, schedule.round_key());

    for round in 0..ROUNDS {
        schedule.retreat(ROUNDS - 1 - round);
        if round > 0 {
            inv_mix_columns(&mut state);
        }
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, schedule.round_key());
    }

    state
}

fn reverse(mut state: Block, schedule: &mut KeySchedule) -> Block {
    for round in 0..ROUNDS {
        add_round_key(&mut state, schedule.round_key());
        sub_bytes(&mut state);
        shift_rows(&mut state);
        if round < ROUNDS - 1 {
            mix_columns(&mut state);
        }
        schedule.advance(round);
    }
    add_round_key(&mut state, schedule.round_key());

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    fn hex_block(s: &str) -> Block {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn reverse_matches_nist_vector() {
        let out = transform(&NIST_PLAIN, &CipherKey::from(NIST_KEY), Direction::Reverse);
        assert_eq!(out, NIST_CIPHER);
    }

    #[test]
    fn forward_matches_nist_vector() {
        let out = transform(&NIST_CIPHER, &CipherKey::from(NIST_KEY), Direction::Forward);
        assert_eq!(out, NIST_PLAIN);
    }

    #[test]
    fn all_zero_inputs_match_captured_fixtures() {
        let key = CipherKey::from([0u8; 16]);
        let block = [0u8; 16];
        assert_eq!(
            transform(&block, &key, Direction::Forward),
            hex_block("140f0f1011b5223d79587717ffd9ec3a")
        );
        assert_eq!(
            transform(&block, &key, Direction::Reverse),
            hex_block("66e94bd4ef8a2c3b884cfa59ca342b2e")
        );
    }

    #[test]
    fn caller_key_is_left_untouched() {
        let key = CipherKey::from(NIST_KEY);
        let _ = transform(&NIST_PLAIN, &key, Direction::Forward);
        let _ = transform(&NIST_PLAIN, &key, Direction::Reverse);
        assert_eq!(key.0, NIST_KEY);
    }

    #[test]
    fn forward_recovers_reverse_output_random() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let key = CipherKey::from(key_bytes);
            let out = transform(&block, &key, Direction::Reverse);
            assert_ne!(out, block);
            assert_eq!(transform(&out, &key, Direction::Forward), block);
        }
    }

    #[test]
    fn slices_of_wrong_length_are_rejected() {
        let err = transform_slices(&[0u8; 17], &NIST_KEY, Direction::Reverse).unwrap_err();
        assert_eq!(
            err,
            CipherError::InvalidLength {
                what: "block",
                expected: 16,
                got: 17
            }
        );
        let err = transform_slices(&NIST_PLAIN, &[], Direction::Forward).unwrap_err();
        assert!(matches!(err, CipherError::InvalidLength { what: "key", .. }));
    }

    #[test]
    fn slices_match_array_entry_point() {
        let out = transform_slices(&NIST_PLAIN, &NIST_KEY, Direction::Reverse).unwrap();
        assert_eq!(out, NIST_CIPHER);
    }
}
