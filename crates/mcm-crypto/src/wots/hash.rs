//! WOTS+ PRF and keyed F-function.
//!
//! Both are single SHA-256 invocations over a 96-byte preimage that starts
//! with an XMSS-style 32-byte left pad whose final byte selects the
//! function: 0 for F, 3 for PRF.

use mcm_types::CryptoError;

use crate::hash::Sha256;

use super::address::WotsAdrs;
use super::params::PARAMSN;

/// Final pad byte selecting the chained F-function.
pub const XMSS_HASH_PADDING_F: u32 = 0;

/// Final pad byte selecting the PRF.
pub const XMSS_HASH_PADDING_PRF: u32 = 3;

/// toByte(val, 32): the 32-byte big-endian encoding of `val`.
pub(crate) fn to_byte32(val: u32) -> [u8; PARAMSN] {
    let mut buf = [0u8; PARAMSN];
    buf[PARAMSN - 4..].copy_from_slice(&val.to_be_bytes());
    buf
}

/// PRF: `out[out_off..+32] = SHA-256(toByte(3) || key || input)`.
pub(crate) fn prf(
    out: &mut [u8],
    out_off: usize,
    input: &[u8; PARAMSN],
    key: &[u8],
) -> Result<(), CryptoError> {
    let mut h = Sha256::new();
    h.update(&to_byte32(XMSS_HASH_PADDING_PRF))?;
    h.update(key)?;
    h.update(input)?;
    out[out_off..out_off + PARAMSN].copy_from_slice(&h.finish()?);
    Ok(())
}

/// One F-chain step:
/// `out[out_off..+32] = SHA-256(toByte(0) || KEY || (in XOR BM))` where
/// `KEY = PRF(ADRS with km=0, pub_seed)` and `BM = PRF(ADRS with km=1,
/// pub_seed)`. Leaves the key-and-mask field of `adrs` set to 1.
pub(crate) fn thash_f(
    out: &mut [u8],
    out_off: usize,
    input: &[u8],
    in_off: usize,
    pub_seed: &[u8],
    adrs: &mut WotsAdrs,
) -> Result<(), CryptoError> {
    let mut key = [0u8; PARAMSN];
    adrs.set_key_and_mask(0)?;
    prf(&mut key, 0, &adrs.to_bytes(), pub_seed)?;

    let mut masked = [0u8; PARAMSN];
    adrs.set_key_and_mask(1)?;
    prf(&mut masked, 0, &adrs.to_bytes(), pub_seed)?;
    for (i, byte) in masked.iter_mut().enumerate() {
        *byte ^= input[in_off + i];
    }

    let mut h = Sha256::new();
    h.update(&to_byte32(XMSS_HASH_PADDING_F))?;
    h.update(&key)?;
    h.update(&masked)?;
    out[out_off..out_off + PARAMSN].copy_from_slice(&h.finish()?);
    Ok(())
}
