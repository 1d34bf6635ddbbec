//! Unified hash surface for the wallet core.
//!
//! Re-exports the three permitted digest implementations and provides the
//! one-shot and incremental entry points the rest of the crate is built on.
//! No other hash algorithms participate in key generation, signing, or
//! address derivation.

use mcm_types::CryptoError;

pub use crate::ripemd::{Ripemd160, RIPEMD160_OUTPUT_SIZE};
pub use crate::sha2::{Sha256, SHA256_OUTPUT_SIZE};
pub use crate::sha3::{Sha3_512, SHA3_512_OUTPUT_SIZE};

/// One-shot SHA-256.
pub fn sha256(data: &[u8]) -> Result<[u8; SHA256_OUTPUT_SIZE], CryptoError> {
    Sha256::digest(data)
}

/// One-shot SHA3-512.
pub fn sha3_512(data: &[u8]) -> Result<[u8; SHA3_512_OUTPUT_SIZE], CryptoError> {
    Sha3_512::digest(data)
}

/// One-shot RIPEMD-160.
pub fn ripemd160(data: &[u8]) -> Result<[u8; RIPEMD160_OUTPUT_SIZE], CryptoError> {
    Ripemd160::digest(data)
}

/// Incremental SHA-256 hasher whose [`digest`](Sha256Digest::digest)
/// finalizes and resets, so a reused hasher starts from the empty state.
#[derive(Clone)]
pub struct Sha256Digest {
    inner: Sha256,
}

impl Sha256Digest {
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.inner.update(data)
    }

    /// Finalize the digest and reset the state for the next message.
    pub fn digest(&mut self) -> Result<[u8; SHA256_OUTPUT_SIZE], CryptoError> {
        let out = self.inner.finish()?;
        self.inner.reset();
        Ok(out)
    }
}

/// Create an incremental SHA-256 hasher.
pub fn new_sha256() -> Sha256Digest {
    Sha256Digest {
        inner: Sha256::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oneshot_lengths() {
        assert_eq!(sha256(b"x").unwrap().len(), 32);
        assert_eq!(sha3_512(b"x").unwrap().len(), 64);
        assert_eq!(ripemd160(b"x").unwrap().len(), 20);
    }

    #[test]
    fn test_incremental_matches_oneshot() {
        let mut h = new_sha256();
        h.update(b"mochimo").unwrap();
        h.update(b" wallet").unwrap();
        assert_eq!(h.digest().unwrap(), sha256(b"mochimo wallet").unwrap());
    }

    #[test]
    fn test_digest_resets() {
        let mut h = new_sha256();
        h.update(b"some data").unwrap();
        h.digest().unwrap();
        // After digest() the hasher is back at the empty state
        assert_eq!(h.digest().unwrap(), sha256(b"").unwrap());
    }
}
