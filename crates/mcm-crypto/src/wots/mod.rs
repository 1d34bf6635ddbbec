//! Mochimo-flavored WOTS+ (Winternitz One-Time Signature Plus).
//!
//! Fixed parameter set w=16, n=32, len=67 over SHA-256 with the XMSS-style
//! keyed F-function and PRF. A signature reveals intermediate chain values
//! for exactly one message digest; signing twice under the same seed leaks
//! enough chain state to forge. Callers hash arbitrary-length payloads with
//! SHA-256 before signing.

mod address;
mod hash;
mod params;

use mcm_types::CryptoError;

pub use hash::{XMSS_HASH_PADDING_F, XMSS_HASH_PADDING_PRF};
pub use params::*;

use address::WotsAdrs;
use hash::{prf, thash_f, to_byte32};

fn check_len(field: &'static str, expected: usize, got: usize) -> Result<(), CryptoError> {
    if expected != got {
        return Err(CryptoError::InvalidLength {
            field,
            expected,
            got,
        });
    }
    Ok(())
}

/// Expand a 32-byte seed into the 2144-byte chain-start vector:
/// `out[32i..] = PRF(toByte(i), seed)` for each chain `i`.
pub fn expand_seed(out: &mut [u8], seed: &[u8]) -> Result<(), CryptoError> {
    check_len("expanded seed output", WOTSSIGBYTES, out.len())?;
    check_len("seed", PARAMSN, seed.len())?;
    for i in 0..WOTSLEN {
        let ctr = to_byte32(i as u32);
        prf(out, i * PARAMSN, &ctr, seed)?;
    }
    Ok(())
}

/// Decompose `msg` into `length` base-16 digits written at
/// `out[offset..offset + length]`, high nibble of each byte first.
/// Consumes the first `ceil(length / 2)` bytes of `msg`; earlier output
/// positions are left untouched.
pub fn base_w(msg: &[u8], out: &mut [u8], offset: usize, length: usize) -> Result<(), CryptoError> {
    if msg.len() * 2 < length {
        return Err(CryptoError::InvalidLength {
            field: "base-w input",
            expected: length.div_ceil(2),
            got: msg.len(),
        });
    }
    if out.len() < offset + length {
        return Err(CryptoError::InvalidLength {
            field: "base-w output",
            expected: offset + length,
            got: out.len(),
        });
    }

    let mut in_idx = 0;
    let mut total = 0u8;
    let mut bits = 0u32;
    for digit in out[offset..offset + length].iter_mut() {
        if bits == 0 {
            total = msg[in_idx];
            in_idx += 1;
            bits = 8;
        }
        bits -= WOTSLOGW as u32;
        *digit = (total >> bits) & 0x0F;
    }
    Ok(())
}

/// Append the 3 checksum digits over the first 64 digits of `lengths`.
fn wots_checksum(lengths: &mut [u8; WOTSLEN]) -> Result<(), CryptoError> {
    let mut csum: u32 = 0;
    for &digit in &lengths[..WOTSLEN1] {
        csum += (WOTSW as u32 - 1) - digit as u32;
    }

    // Align the 12 checksum bits to the top of the 2-byte encoding
    csum <<= 8 - (WOTSLEN2 * WOTSLOGW) % 8;
    let csum_bytes = (csum as u16).to_be_bytes();
    base_w(&csum_bytes, lengths, WOTSLEN1, WOTSLEN2)
}

/// Compute the full 67-digit length vector for a 32-byte message digest:
/// 64 message digits followed by 3 checksum digits.
pub fn chain_lengths(msg: &[u8]) -> Result<[u8; WOTSLEN], CryptoError> {
    check_len("message digest", PARAMSN, msg.len())?;
    let mut lengths = [0u8; WOTSLEN];
    base_w(msg, &mut lengths, 0, WOTSLEN1)?;
    wots_checksum(&mut lengths)?;
    Ok(lengths)
}

/// Walk the F-chain from position `start` for at most `steps` steps, never
/// past position W-1. Returns the value at the end of the walk.
fn gen_chain(
    input: &[u8],
    in_off: usize,
    start: usize,
    steps: usize,
    pub_seed: &[u8],
    adrs: &mut WotsAdrs,
) -> Result<[u8; PARAMSN], CryptoError> {
    let mut out = [0u8; PARAMSN];
    out.copy_from_slice(&input[in_off..in_off + PARAMSN]);

    let mut i = start;
    while i < start + steps && i < WOTSW {
        adrs.set_hash_addr(i as u32)?;
        let prev = out;
        thash_f(&mut out, 0, &prev, 0, pub_seed, adrs)?;
        i += 1;
    }
    Ok(out)
}

/// Generate the 2144-byte public key: every chain walked the full W-1
/// steps from its PRF-expanded start value.
pub fn pkgen(seed: &[u8], pub_seed: &[u8], addr: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_len("seed", PARAMSN, seed.len())?;
    check_len("public seed", PARAMSN, pub_seed.len())?;
    check_len("address", PARAMSN, addr.len())?;

    let mut pk = vec![0u8; WOTSSIGBYTES];
    expand_seed(&mut pk, seed)?;

    let mut adrs = WotsAdrs::from_bytes(addr);
    for i in 0..WOTSLEN {
        adrs.set_chain_addr(i as u32)?;
        let end = gen_chain(&pk, i * PARAMSN, 0, WOTSW - 1, pub_seed, &mut adrs)?;
        pk[i * PARAMSN..(i + 1) * PARAMSN].copy_from_slice(&end);
    }
    Ok(pk)
}

/// Sign a 32-byte message digest: chain `i` is walked `lengths[i]` steps
/// from its start value. One-time use per seed.
pub fn sign(
    msg: &[u8],
    seed: &[u8],
    pub_seed: &[u8],
    addr: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    check_len("seed", PARAMSN, seed.len())?;
    check_len("public seed", PARAMSN, pub_seed.len())?;
    check_len("address", PARAMSN, addr.len())?;
    let lengths = chain_lengths(msg)?;

    let mut sig = vec![0u8; WOTSSIGBYTES];
    expand_seed(&mut sig, seed)?;

    let mut adrs = WotsAdrs::from_bytes(addr);
    for i in 0..WOTSLEN {
        adrs.set_chain_addr(i as u32)?;
        let mid = gen_chain(
            &sig,
            i * PARAMSN,
            0,
            lengths[i] as usize,
            pub_seed,
            &mut adrs,
        )?;
        sig[i * PARAMSN..(i + 1) * PARAMSN].copy_from_slice(&mid);
    }
    Ok(sig)
}

/// Recover the public key a signature commits to: chain `i` is walked the
/// remaining `W-1 - lengths[i]` steps from position `lengths[i]`. The
/// caller-supplied address is copied before use, so the caller's buffer is
/// never mutated. Callers compare the result against the known public key.
pub fn pk_from_sig(
    sig: &[u8],
    msg: &[u8],
    pub_seed: &[u8],
    addr: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    check_len("signature", WOTSSIGBYTES, sig.len())?;
    check_len("public seed", PARAMSN, pub_seed.len())?;
    check_len("address", PARAMSN, addr.len())?;
    let lengths = chain_lengths(msg)?;

    let mut pk = vec![0u8; WOTSSIGBYTES];
    let mut adrs = WotsAdrs::from_bytes(addr);
    for i in 0..WOTSLEN {
        adrs.set_chain_addr(i as u32)?;
        let start = lengths[i] as usize;
        let end = gen_chain(sig, i * PARAMSN, start, WOTSW - 1 - start, pub_seed, &mut adrs)?;
        pk[i * PARAMSN..(i + 1) * PARAMSN].copy_from_slice(&end);
    }
    Ok(pk)
}
