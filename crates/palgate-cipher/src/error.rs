//! Error type for the block engine.

use thiserror::Error;

/// Errors raised before any cipher work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CipherError {
    /// A block or key buffer had the wrong size.
    #[error("{what} must be {expected} bytes, got {got}")]
    InvalidLength {
        /// Which buffer was rejected.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },
}
