//! Byte-packing helpers.

use crate::constants::PHONE_BYTES;

/// Packs a value as eight big-endian bytes.
#[inline]
pub fn pack_u64_be(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// The low six bytes of the big-endian packed phone number.
pub fn phone_identifier(phone_number: u64) -> [u8; PHONE_BYTES] {
    let packed = pack_u64_be(phone_number);
    let mut out = [0u8; PHONE_BYTES];
    out.copy_from_slice(&packed[8 - PHONE_BYTES..]);
    out
}

/// Reassembles a phone number from its six identifier bytes.
pub fn phone_from_identifier(identifier: &[u8; PHONE_BYTES]) -> u64 {
    let mut packed = [0u8; 8];
    packed[8 - PHONE_BYTES..].copy_from_slice(identifier);
    u64::from_be_bytes(packed)
}
