#![forbid(unsafe_code)]
#![doc = "Utility functions for the Mochimo WOTS+ wallet core: byte buffer, hex, base58, CRC-16."]

pub mod base58;
pub mod bytebuf;
pub mod crc;
pub mod hex;
