#![forbid(unsafe_code)]
#![doc = "Mochimo-flavored WOTS+ one-time signatures and wallet address derivation."]

// Hash primitives
pub mod ripemd;
pub mod sha2;
pub mod sha3;

pub mod hash;

// WOTS+ scheme
pub mod wots;

// Address framing and tags
pub mod addr;

// Wallet facade
pub mod wallet;
