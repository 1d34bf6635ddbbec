//! SHA3-512 hash algorithm.
//!
//! SHA3-512 produces a 512-bit (64-byte) hash value as defined in FIPS 202.
//! It is based on the Keccak sponge construction with a 1600-bit state and,
//! for the 512-bit variant, a 72-byte rate. The wallet core uses it only as
//! the inner step of the address-hash derivation.

use mcm_types::CryptoError;

/// Keccak state size: 25 lanes of 64 bits = 1600 bits.
const KECCAK_STATE_SIZE: usize = 25;

/// SHA3-512 output size in bytes.
pub const SHA3_512_OUTPUT_SIZE: usize = 64;

/// SHA3-512 rate (block size) in bytes: (1600 - 2*512) / 8.
pub const SHA3_512_RATE: usize = 72;

/// Keccak-f[1600] round constants (FIPS 202 Section 3.2.5).
const ROUND_CONSTANTS: [u64; 24] = [
    0x0000000000000001, 0x0000000000008082, 0x800000000000808a, 0x8000000080008000,
    0x000000000000808b, 0x0000000080000001, 0x8000000080008081, 0x8000000000008009,
    0x000000000000008a, 0x0000000000000088, 0x0000000080008009, 0x000000008000000a,
    0x000000008000808b, 0x800000000000008b, 0x8000000000008089, 0x8000000000008003,
    0x8000000000008002, 0x8000000000000080, 0x000000000000800a, 0x800000008000000a,
    0x8000000080008081, 0x8000000000008080, 0x0000000080000001, 0x8000000080008008,
];

/// Rotation offsets for the rho step, in pi-step visitation order.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Lane visitation order for the pi step.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

fn keccak_f1600(state: &mut [u64; KECCAK_STATE_SIZE]) {
    for &rc in &ROUND_CONSTANTS {
        // theta
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= d;
            }
        }

        // rho and pi
        let mut last = state[1];
        for i in 0..24 {
            let j = PI[i];
            let tmp = state[j];
            state[j] = last.rotate_left(RHO[i]);
            last = tmp;
        }

        // chi
        for y in 0..5 {
            let row = [
                state[5 * y],
                state[5 * y + 1],
                state[5 * y + 2],
                state[5 * y + 3],
                state[5 * y + 4],
            ];
            for x in 0..5 {
                state[5 * y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // iota
        state[0] ^= rc;
    }
}

/// SHA3-512 hash context.
#[derive(Clone)]
pub struct Sha3_512 {
    state: [u64; KECCAK_STATE_SIZE],
    absorbed: usize,
}

impl Sha3_512 {
    /// Create a new SHA3-512 hash context.
    pub fn new() -> Self {
        Self {
            state: [0u64; KECCAK_STATE_SIZE],
            absorbed: 0,
        }
    }

    fn absorb_byte(&mut self, byte: u8) {
        self.state[self.absorbed / 8] ^= (byte as u64) << (8 * (self.absorbed % 8));
        self.absorbed += 1;
        if self.absorbed == SHA3_512_RATE {
            keccak_f1600(&mut self.state);
            self.absorbed = 0;
        }
    }

    /// Feed data into the hash computation.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        for &byte in data {
            self.absorb_byte(byte);
        }
        Ok(())
    }

    /// Finalize the hash and return the 64-byte digest.
    pub fn finish(&mut self) -> Result<[u8; SHA3_512_OUTPUT_SIZE], CryptoError> {
        // SHA-3 domain suffix 0x06 and the final sponge padding bit
        self.state[self.absorbed / 8] ^= 0x06u64 << (8 * (self.absorbed % 8));
        self.state[(SHA3_512_RATE - 1) / 8] ^= 0x80u64 << (8 * ((SHA3_512_RATE - 1) % 8));
        keccak_f1600(&mut self.state);

        let mut out = [0u8; SHA3_512_OUTPUT_SIZE];
        for (i, chunk) in out.chunks_mut(8).enumerate() {
            chunk.copy_from_slice(&self.state[i].to_le_bytes());
        }
        Ok(out)
    }

    /// Reset the hash context for a new computation.
    pub fn reset(&mut self) {
        self.state = [0u64; KECCAK_STATE_SIZE];
        self.absorbed = 0;
    }

    /// One-shot: compute the SHA3-512 digest of `data`.
    pub fn digest(data: &[u8]) -> Result<[u8; SHA3_512_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }
}
