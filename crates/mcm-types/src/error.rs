/// Cryptographic and framing operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    // Length preconditions
    #[error("invalid {field} length: expected {expected}, got {got}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    // Tag errors
    #[error("invalid tag")]
    InvalidTag,

    // Byte buffer errors
    #[error("buffer overflow: position {position} of {capacity}, requested {requested}")]
    BufferOverflow {
        position: usize,
        capacity: usize,
        requested: usize,
    },
    #[error("buffer underflow: position {position} of {capacity}, requested {requested}")]
    BufferUnderflow {
        position: usize,
        capacity: usize,
        requested: usize,
    },
    #[error("invalid position {position} for capacity {capacity}")]
    InvalidPosition { position: usize, capacity: usize },

    // Encoding errors
    #[error("invalid base58 string")]
    InvalidBase58,
    #[error("tag checksum mismatch")]
    ChecksumMismatch,
    #[error("invalid hex string")]
    InvalidHex,

    // Wallet errors
    #[error("wallet has no secret")]
    MissingSecret,
    #[error("wallet has no address")]
    MissingAddress,

    // Framing errors
    #[error("invalid operation code")]
    InvalidOperationCode,

    // Randomness errors
    #[error("random generation failed")]
    RandFail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_structured_variants() {
        let e = CryptoError::InvalidLength {
            field: "secret",
            expected: 32,
            got: 16,
        };
        assert_eq!(e.to_string(), "invalid secret length: expected 32, got 16");

        let e = CryptoError::BufferOverflow {
            position: 30,
            capacity: 32,
            requested: 4,
        };
        assert_eq!(
            e.to_string(),
            "buffer overflow: position 30 of 32, requested 4"
        );

        let e = CryptoError::InvalidPosition {
            position: 33,
            capacity: 32,
        };
        assert_eq!(e.to_string(), "invalid position 33 for capacity 32");
    }

    #[test]
    fn test_display_simple_variants() {
        assert_eq!(CryptoError::InvalidTag.to_string(), "invalid tag");
        assert_eq!(
            CryptoError::InvalidBase58.to_string(),
            "invalid base58 string"
        );
        assert_eq!(
            CryptoError::ChecksumMismatch.to_string(),
            "tag checksum mismatch"
        );
        assert_eq!(
            CryptoError::MissingSecret.to_string(),
            "wallet has no secret"
        );
        assert_eq!(
            CryptoError::InvalidOperationCode.to_string(),
            "invalid operation code"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CryptoError>();
    }
}
