//! Fixed protocol constants shared with the vendor's mobile client.
//!
//! Changing any of these breaks interoperability with the remote service.

pub use palgate_cipher::{BLOCK_SIZE, KEY_SIZE};

/// Number of phone-number bytes carried in a token and in the working key.
pub const PHONE_BYTES: usize = 6;

/// Serialized token length: marker, identifier, cipher output.
pub const TOKEN_SIZE: usize = 1 + PHONE_BYTES + BLOCK_SIZE;

/// Length of the hex form of a token.
pub const TOKEN_HEX_LEN: usize = TOKEN_SIZE * 2;

/// Master key compiled into every client.
pub const MASTER_KEY: [u8; KEY_SIZE] = [
    0xfa, 0xd5, 0x6c, 0x67, 0x5f, 0x8e, 0x6b, 0x0d, 0x7a, 0xdf, 0xa3, 0x49, 0xb7, 0x59, 0xc9, 0x27,
];

/// Seconds added to the timestamp before it is embedded.
pub const TIMESTAMP_OFFSET: u32 = 2;

/// Where the phone identifier overwrites the working key.
pub const KEY_PHONE_OFFSET: usize = 6;

/// Marker stored little-endian in the timestamp block.
pub const TIMESTAMP_MARKER: u16 = 0x0a0a;

/// Offset of the marker inside the timestamp block.
pub const TIMESTAMP_MARKER_OFFSET: usize = 1;

/// Offset of the big-endian timestamp inside the timestamp block.
pub const TIMESTAMP_VALUE_OFFSET: usize = 10;
