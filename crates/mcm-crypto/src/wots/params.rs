//! Fixed WOTS+ parameter set (w=16, n=32, len=67).

/// Winternitz parameter.
pub const WOTSW: usize = 16;

/// log2(W): bits per message digit.
pub const WOTSLOGW: usize = 4;

/// Hash output length in bytes.
pub const PARAMSN: usize = 32;

/// Message digits: 8 * n / log2(W) = 64.
pub const WOTSLEN1: usize = 64;

/// Checksum digits.
pub const WOTSLEN2: usize = 3;

/// Total chains: len_1 + len_2 = 67.
pub const WOTSLEN: usize = WOTSLEN1 + WOTSLEN2;

/// Signature and public key size in bytes: len * n = 2144.
pub const WOTSSIGBYTES: usize = WOTSLEN * PARAMSN;
