//! WOTS+ hash-address structure.
//!
//! 32-byte address carried through every PRF and F invocation. The layout
//! follows the XMSS address scheme, but only three fields are ever written:
//!   [20:24] chain address
//!   [24:28] hash address
//!   [28:32] key-and-mask (0 = key, 1 = bitmask)
//! Fields are stored as big-endian 32-bit words; the serialization used
//! inside PRF preimages reverses each 4-byte word individually.

use mcm_types::CryptoError;
use mcm_utils::bytebuf::ByteBuffer;

const CHAIN_ADDR_OFFSET: usize = 20;
const HASH_ADDR_OFFSET: usize = 24;
const KEY_AND_MASK_OFFSET: usize = 28;

#[derive(Clone)]
pub(crate) struct WotsAdrs {
    buf: ByteBuffer,
}

impl WotsAdrs {
    /// Copy a caller-supplied 32-byte address. The copy keeps the chain
    /// loops from mutating caller state.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            buf: ByteBuffer::wrap(bytes),
        }
    }

    fn put_field(&mut self, offset: usize, value: u32) -> Result<(), CryptoError> {
        self.buf.set_position(offset)?;
        self.buf.put_int(value as i32)
    }

    pub fn set_chain_addr(&mut self, chain: u32) -> Result<(), CryptoError> {
        self.put_field(CHAIN_ADDR_OFFSET, chain)
    }

    pub fn set_hash_addr(&mut self, hash: u32) -> Result<(), CryptoError> {
        self.put_field(HASH_ADDR_OFFSET, hash)
    }

    pub fn set_key_and_mask(&mut self, km: u32) -> Result<(), CryptoError> {
        self.put_field(KEY_AND_MASK_OFFSET, km)
    }

    /// Canonical serialization for PRF preimages: each 4-byte word of the
    /// address is byte-reversed. Not a plain endian flip of the buffer.
    pub fn to_bytes(&self) -> [u8; 32] {
        let src = self.buf.as_slice();
        let mut out = [0u8; 32];
        for i in (0..32).step_by(4) {
            out[i] = src[i + 3];
            out[i + 1] = src[i + 2];
            out[i + 2] = src[i + 1];
            out[i + 3] = src[i];
        }
        out
    }
}
