//! RIPEMD-160 hash algorithm.
//!
//! RIPEMD-160 produces a 160-bit (20-byte) hash value as defined in
//! ISO/IEC 10118-3. The wallet core uses it only as the outer step of the
//! address-hash derivation, compressing the SHA3-512 digest of a public
//! key down to the 20-byte address tag.

use mcm_types::CryptoError;

/// RIPEMD-160 output size in bytes.
pub const RIPEMD160_OUTPUT_SIZE: usize = 20;

/// RIPEMD-160 block size in bytes.
pub const RIPEMD160_BLOCK_SIZE: usize = 64;

/// RIPEMD-160 initial hash values.
const H_RIPEMD160: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// Left-line round constants.
const K_LEFT: [u32; 5] = [0x00000000, 0x5a827999, 0x6ed9eba1, 0x8f1bbcdc, 0xa953fd4e];

/// Right-line round constants.
const K_RIGHT: [u32; 5] = [0x50a28be6, 0x5c4dd124, 0x6d703ef3, 0x7a6d76e9, 0x00000000];

/// Left-line message word order.
const R_LEFT: [usize; 80] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, // round 1
    7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8, // round 2
    3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12, // round 3
    1, 9, 11, 10, 0, 8, 12, 4, 13, 3, 7, 15, 14, 5, 6, 2, // round 4
    4, 0, 5, 9, 7, 12, 2, 10, 14, 1, 3, 8, 11, 6, 15, 13, // round 5
];

/// Right-line message word order.
const R_RIGHT: [usize; 80] = [
    5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12, // round 1
    6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12, 4, 9, 1, 2, // round 2
    15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13, // round 3
    8, 6, 4, 1, 3, 11, 15, 0, 5, 12, 2, 13, 9, 7, 10, 14, // round 4
    12, 15, 10, 4, 1, 5, 8, 7, 6, 2, 13, 14, 0, 3, 9, 11, // round 5
];

/// Left-line per-step rotate amounts.
const S_LEFT: [u32; 80] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8, // round 1
    7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12, // round 2
    11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5, // round 3
    11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12, // round 4
    9, 15, 5, 11, 6, 8, 13, 12, 5, 12, 13, 14, 11, 8, 5, 6, // round 5
];

/// Right-line per-step rotate amounts.
const S_RIGHT: [u32; 80] = [
    8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6, // round 1
    9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11, // round 2
    9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5, // round 3
    15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8, // round 4
    8, 5, 12, 9, 12, 5, 14, 6, 8, 13, 6, 5, 15, 13, 11, 11, // round 5
];

/// Nonlinear function for step `j` of the left line (right line uses 79 - j).
fn f(j: usize, x: u32, y: u32, z: u32) -> u32 {
    match j {
        0..=15 => x ^ y ^ z,
        16..=31 => (x & y) | (!x & z),
        32..=47 => (x | !y) ^ z,
        48..=63 => (x & z) | (y & !z),
        _ => x ^ (y | !z),
    }
}

fn ripemd160_compress(state: &mut [u32; 5], block: &[u8]) {
    // Parse 16 little-endian words
    let mut w = [0u32; 16];
    for i in 0..16 {
        w[i] = u32::from_le_bytes([
            block[4 * i],
            block[4 * i + 1],
            block[4 * i + 2],
            block[4 * i + 3],
        ]);
    }

    let [mut al, mut bl, mut cl, mut dl, mut el] = *state;
    let [mut ar, mut br, mut cr, mut dr, mut er] = *state;

    for j in 0..80 {
        // Left line runs f1..f5, right line runs f5..f1
        let t = al
            .wrapping_add(f(j, bl, cl, dl))
            .wrapping_add(w[R_LEFT[j]])
            .wrapping_add(K_LEFT[j / 16])
            .rotate_left(S_LEFT[j])
            .wrapping_add(el);
        al = el;
        el = dl;
        dl = cl.rotate_left(10);
        cl = bl;
        bl = t;

        let t = ar
            .wrapping_add(f(79 - j, br, cr, dr))
            .wrapping_add(w[R_RIGHT[j]])
            .wrapping_add(K_RIGHT[j / 16])
            .rotate_left(S_RIGHT[j])
            .wrapping_add(er);
        ar = er;
        er = dr;
        dr = cr.rotate_left(10);
        cr = br;
        br = t;
    }

    let t = state[1].wrapping_add(cl).wrapping_add(dr);
    state[1] = state[2].wrapping_add(dl).wrapping_add(er);
    state[2] = state[3].wrapping_add(el).wrapping_add(ar);
    state[3] = state[4].wrapping_add(al).wrapping_add(br);
    state[4] = state[0].wrapping_add(bl).wrapping_add(cr);
    state[0] = t;
}

/// RIPEMD-160 hash context.
#[derive(Clone)]
pub struct Ripemd160 {
    state: [u32; 5],
    count: u64,
    buffer: [u8; RIPEMD160_BLOCK_SIZE],
    buffer_len: usize,
}

impl Ripemd160 {
    /// Create a new RIPEMD-160 hash context.
    pub fn new() -> Self {
        Self {
            state: H_RIPEMD160,
            count: 0,
            buffer: [0u8; RIPEMD160_BLOCK_SIZE],
            buffer_len: 0,
        }
    }

    /// Feed data into the hash computation.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        let mut offset = 0;
        if self.buffer_len > 0 {
            let need = RIPEMD160_BLOCK_SIZE - self.buffer_len;
            if data.len() < need {
                self.buffer[self.buffer_len..self.buffer_len + data.len()].copy_from_slice(data);
                self.buffer_len += data.len();
                self.count += data.len() as u64;
                return Ok(());
            }
            self.buffer[self.buffer_len..RIPEMD160_BLOCK_SIZE].copy_from_slice(&data[..need]);
            let buf = self.buffer;
            ripemd160_compress(&mut self.state, &buf);
            offset = need;
            self.buffer_len = 0;
        }

        while offset + RIPEMD160_BLOCK_SIZE <= data.len() {
            ripemd160_compress(&mut self.state, &data[offset..offset + RIPEMD160_BLOCK_SIZE]);
            offset += RIPEMD160_BLOCK_SIZE;
        }

        let remaining = data.len() - offset;
        if remaining > 0 {
            self.buffer[..remaining].copy_from_slice(&data[offset..]);
            self.buffer_len = remaining;
        }
        self.count += data.len() as u64;
        Ok(())
    }

    /// Finalize the hash and return the 20-byte digest.
    pub fn finish(&mut self) -> Result<[u8; RIPEMD160_OUTPUT_SIZE], CryptoError> {
        let bit_len = self.count * 8;
        let mut pad_buf = [0u8; 2 * RIPEMD160_BLOCK_SIZE];
        let mut pad_len = self.buffer_len;
        pad_buf[..pad_len].copy_from_slice(&self.buffer[..self.buffer_len]);

        pad_buf[pad_len] = 0x80;
        pad_len += 1;

        if pad_len > 56 {
            while pad_len < RIPEMD160_BLOCK_SIZE {
                pad_buf[pad_len] = 0;
                pad_len += 1;
            }
            ripemd160_compress(&mut self.state, &pad_buf[..RIPEMD160_BLOCK_SIZE]);
            pad_buf = [0u8; 2 * RIPEMD160_BLOCK_SIZE];
            pad_len = 0;
        }

        while pad_len < 56 {
            pad_buf[pad_len] = 0;
            pad_len += 1;
        }

        // Little-endian length encoding
        pad_buf[56..64].copy_from_slice(&bit_len.to_le_bytes());
        ripemd160_compress(&mut self.state, &pad_buf[..RIPEMD160_BLOCK_SIZE]);

        // Output in little-endian
        let mut out = [0u8; RIPEMD160_OUTPUT_SIZE];
        for (i, &word) in self.state.iter().enumerate() {
            out[4 * i..4 * i + 4].copy_from_slice(&word.to_le_bytes());
        }
        Ok(out)
    }

    /// Reset the hash context for a new computation.
    pub fn reset(&mut self) {
        self.state = H_RIPEMD160;
        self.count = 0;
        self.buffer = [0u8; RIPEMD160_BLOCK_SIZE];
        self.buffer_len = 0;
    }

    /// One-shot: compute the RIPEMD-160 digest of `data`.
    pub fn digest(data: &[u8]) -> Result<[u8; RIPEMD160_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }
}
