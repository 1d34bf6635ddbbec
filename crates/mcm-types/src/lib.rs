#![forbid(unsafe_code)]
#![doc = "Common types and error codes for the Mochimo WOTS+ wallet core."]

pub mod error;

pub use error::*;
