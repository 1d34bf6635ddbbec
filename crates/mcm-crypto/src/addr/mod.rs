//! Wallet address framing and tags.
//!
//! A full wallet address is 2208 bytes: the 2144-byte WOTS+ public key,
//! the 32-byte public seed, and the 32-byte addr-seed (rnd2). The last 12
//! bytes of rnd2 may carry a legacy tag. The v3 scheme compresses the
//! public key to a 20-byte tag via RIPEMD160(SHA3-512(pk)) and pairs it
//! with a 20-byte address hash into a 40-byte address, optionally followed
//! by a little-endian u64 amount on the wire.

use mcm_types::CryptoError;
use mcm_utils::{base58, crc::crc16};

use crate::hash::{ripemd160, sha3_512};
use crate::wots::{PARAMSN, WOTSSIGBYTES};

/// Full wallet address size: pk || pub_seed || rnd2.
pub const ADDRESS_LEN: usize = WOTSSIGBYTES + 2 * PARAMSN;

/// Legacy tag size, stored in the last bytes of rnd2.
pub const LEGACY_TAG_LEN: usize = 12;

/// v3 tag size.
pub const V3_TAG_LEN: usize = 20;

/// v3 address size: tag || address hash.
pub const V3_ADDR_LEN: usize = 2 * V3_TAG_LEN;

/// Size of the little-endian amount suffix on the wire.
pub const AMOUNT_LEN: usize = 8;

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

/// Split a 2208-byte wallet address into (pk, pub_seed, rnd2).
pub fn split_address(address: &[u8]) -> Result<(&[u8], &[u8], &[u8]), CryptoError> {
    check_len("address", ADDRESS_LEN, address.len())?;
    Ok((
        &address[..WOTSSIGBYTES],
        &address[WOTSSIGBYTES..WOTSSIGBYTES + PARAMSN],
        &address[WOTSSIGBYTES + PARAMSN..],
    ))
}

/// A legacy tag is 12 bytes whose first byte is neither 0x00 nor 0x42.
pub fn tag_is_valid(tag: &[u8]) -> bool {
    tag.len() == LEGACY_TAG_LEN && tag[0] != 0x00 && tag[0] != 0x42
}

/// Return a copy of `address` with its last 12 bytes replaced by `tag`.
pub fn tag_apply(address: &[u8], tag: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_len("address", ADDRESS_LEN, address.len())?;
    if !tag_is_valid(tag) {
        return Err(CryptoError::InvalidTag);
    }
    let mut tagged = address.to_vec();
    tagged[ADDRESS_LEN - LEGACY_TAG_LEN..].copy_from_slice(tag);
    Ok(tagged)
}

/// Extract the 12-byte legacy tag slot of `address`.
pub fn tag_extract(address: &[u8]) -> Result<[u8; LEGACY_TAG_LEN], CryptoError> {
    check_len("address", ADDRESS_LEN, address.len())?;
    let mut tag = [0u8; LEGACY_TAG_LEN];
    tag.copy_from_slice(&address[ADDRESS_LEN - LEGACY_TAG_LEN..]);
    Ok(tag)
}

/// The v3 address hash: RIPEMD160(SHA3-512(data)).
pub fn addr_hash(data: &[u8]) -> Result<[u8; V3_TAG_LEN], CryptoError> {
    ripemd160(&sha3_512(data)?)
}

/// The implicit 40-byte form of a 20-byte tag: the tag duplicated into the
/// hash slot.
pub fn addr_from_implicit(tag: &[u8]) -> Result<[u8; V3_ADDR_LEN], CryptoError> {
    Ok(WotsAddress::from_implicit(tag)?.to_bytes())
}

/// The 40-byte v3 address of a 2144-byte WOTS+ public key.
pub fn addr_from_wots(pk: &[u8]) -> Result<[u8; V3_ADDR_LEN], CryptoError> {
    Ok(WotsAddress::from_wots_pk(pk)?.to_bytes())
}

/// A v3 address (tag || hash) with an associated amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WotsAddress {
    address: [u8; V3_ADDR_LEN],
    amount: u64,
}

impl Default for WotsAddress {
    fn default() -> Self {
        Self {
            address: [0u8; V3_ADDR_LEN],
            amount: 0,
        }
    }
}

impl WotsAddress {
    /// Build from a 20-byte tag and a 20-byte address hash.
    pub fn new(tag: &[u8], hash: &[u8]) -> Result<Self, CryptoError> {
        check_len("tag", V3_TAG_LEN, tag.len())?;
        check_len("address hash", V3_TAG_LEN, hash.len())?;
        let mut address = [0u8; V3_ADDR_LEN];
        address[..V3_TAG_LEN].copy_from_slice(tag);
        address[V3_TAG_LEN..].copy_from_slice(hash);
        Ok(Self { address, amount: 0 })
    }

    /// Implicit form: the tag is duplicated into the hash slot.
    pub fn from_implicit(tag: &[u8]) -> Result<Self, CryptoError> {
        Self::new(tag, tag)
    }

    /// Derive tag and hash from a 2144-byte WOTS+ public key.
    pub fn from_wots_pk(pk: &[u8]) -> Result<Self, CryptoError> {
        check_len("public key", WOTSSIGBYTES, pk.len())?;
        let hash = addr_hash(pk)?;
        Self::from_implicit(&hash)
    }

    /// Parse from any of the accepted wire lengths: 2144 (public key),
    /// 40 (address), or 48 (address with amount). Any other length yields
    /// a zeroed address.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        match bytes.len() {
            WOTSSIGBYTES => Self::from_wots_pk(bytes),
            V3_ADDR_LEN => {
                let mut address = [0u8; V3_ADDR_LEN];
                address.copy_from_slice(bytes);
                Ok(Self { address, amount: 0 })
            }
            len if len == V3_ADDR_LEN + AMOUNT_LEN => {
                let mut address = [0u8; V3_ADDR_LEN];
                address.copy_from_slice(&bytes[..V3_ADDR_LEN]);
                let mut amount_bytes = [0u8; AMOUNT_LEN];
                amount_bytes.copy_from_slice(&bytes[V3_ADDR_LEN..]);
                Ok(Self {
                    address,
                    amount: u64::from_le_bytes(amount_bytes),
                })
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn tag(&self) -> &[u8] {
        &self.address[..V3_TAG_LEN]
    }

    pub fn address_hash(&self) -> &[u8] {
        &self.address[V3_TAG_LEN..]
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: u64) {
        self.amount = amount;
    }

    /// The 40-byte external form.
    pub fn to_bytes(&self) -> [u8; V3_ADDR_LEN] {
        self.address
    }

    /// The 48-byte external form: address followed by the little-endian
    /// amount.
    pub fn to_bytes_with_amount(&self) -> [u8; V3_ADDR_LEN + AMOUNT_LEN] {
        let mut out = [0u8; V3_ADDR_LEN + AMOUNT_LEN];
        out[..V3_ADDR_LEN].copy_from_slice(&self.address);
        out[V3_ADDR_LEN..].copy_from_slice(&self.amount.to_le_bytes());
        out
    }
}

/// Encode a 20-byte tag as base58 over tag || crc16 (little-endian).
pub fn addr_tag_to_base58(tag: &[u8]) -> Result<String, CryptoError> {
    check_len("tag", V3_TAG_LEN, tag.len())?;
    let crc = crc16(tag);
    let mut payload = [0u8; V3_TAG_LEN + 2];
    payload[..V3_TAG_LEN].copy_from_slice(tag);
    payload[V3_TAG_LEN] = (crc & 0xFF) as u8;
    payload[V3_TAG_LEN + 1] = (crc >> 8) as u8;
    Ok(base58::encode(&payload))
}

/// Decode and validate a base58 tag, returning the 20 tag bytes.
pub fn addr_tag_from_base58(encoded: &str) -> Result<[u8; V3_TAG_LEN], CryptoError> {
    let decoded = base58::decode(encoded)?;
    if decoded.len() != V3_TAG_LEN + 2 {
        return Err(CryptoError::InvalidBase58);
    }
    let crc = crc16(&decoded[..V3_TAG_LEN]);
    if decoded[V3_TAG_LEN] != (crc & 0xFF) as u8 || decoded[V3_TAG_LEN + 1] != (crc >> 8) as u8 {
        return Err(CryptoError::ChecksumMismatch);
    }
    let mut tag = [0u8; V3_TAG_LEN];
    tag.copy_from_slice(&decoded[..V3_TAG_LEN]);
    Ok(tag)
}

/// Whether `encoded` is a well-formed base58 tag with a valid checksum.
pub fn validate_base58_tag(encoded: &str) -> bool {
    addr_tag_from_base58(encoded).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcm_utils::hex;

    #[test]
    fn test_address_constants() {
        assert_eq!(ADDRESS_LEN, 2208);
        assert_eq!(V3_ADDR_LEN, 40);
    }

    #[test]
    fn test_split_address() {
        let mut address = vec![0u8; ADDRESS_LEN];
        address[0] = 1;
        address[WOTSSIGBYTES] = 2;
        address[WOTSSIGBYTES + PARAMSN] = 3;
        let (pk, pub_seed, rnd2) = split_address(&address).unwrap();
        assert_eq!((pk.len(), pub_seed.len(), rnd2.len()), (2144, 32, 32));
        assert_eq!((pk[0], pub_seed[0], rnd2[0]), (1, 2, 3));

        assert!(matches!(
            split_address(&[0u8; 2207]),
            Err(CryptoError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_tag_is_valid() {
        let mut tag = [0x41u8; LEGACY_TAG_LEN];
        assert!(tag_is_valid(&tag));
        tag[0] = 0x00;
        assert!(!tag_is_valid(&tag));
        tag[0] = 0x42;
        assert!(!tag_is_valid(&tag));
        assert!(!tag_is_valid(&[0x41u8; 11]));
        assert!(!tag_is_valid(&[0x41u8; 13]));
    }

    #[test]
    fn test_tag_apply_extract_roundtrip() {
        let address = vec![0xEEu8; ADDRESS_LEN];
        let tag = [0x41u8; LEGACY_TAG_LEN];
        let tagged = tag_apply(&address, &tag).unwrap();
        assert_eq!(tagged.len(), ADDRESS_LEN);
        assert_eq!(&tagged[..ADDRESS_LEN - LEGACY_TAG_LEN], &address[..ADDRESS_LEN - LEGACY_TAG_LEN]);
        assert_eq!(tag_extract(&tagged).unwrap(), tag);
        // the input address is untouched
        assert_eq!(address, vec![0xEEu8; ADDRESS_LEN]);
    }

    #[test]
    fn test_tag_apply_rejects_invalid() {
        let address = vec![0u8; ADDRESS_LEN];
        assert!(matches!(
            tag_apply(&address, &[0x42u8; LEGACY_TAG_LEN]),
            Err(CryptoError::InvalidTag)
        ));
        assert!(matches!(
            tag_apply(&address, &[0x41u8; 11]),
            Err(CryptoError::InvalidTag)
        ));
        assert!(matches!(
            tag_apply(&[0u8; 10], &[0x41u8; LEGACY_TAG_LEN]),
            Err(CryptoError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_addr_hash_fixed_point() {
        let pk = vec![0x42u8; WOTSSIGBYTES];
        let hash = addr_hash(&pk).unwrap();
        assert_eq!(
            hex::encode(&hash),
            "7fe0655e22061d36f253085bfe4e3ffe8079176d"
        );
        let address = addr_from_wots(&pk).unwrap();
        assert_eq!(
            hex::encode(&address),
            "7fe0655e22061d36f253085bfe4e3ffe8079176d7fe0655e22061d36f253085bfe4e3ffe8079176d"
        );
    }

    #[test]
    fn test_implicit_duplicates_tag() {
        let tag = [0x99u8; V3_TAG_LEN];
        let wa = WotsAddress::from_implicit(&tag).unwrap();
        assert_eq!(wa.tag(), &tag);
        assert_eq!(wa.address_hash(), &tag);
        assert_eq!(wa.amount(), 0);
    }

    #[test]
    fn test_from_bytes_lengths() {
        // 2144: derive from public key
        let pk = vec![0x42u8; WOTSSIGBYTES];
        let wa = WotsAddress::from_bytes(&pk).unwrap();
        assert_eq!(wa, WotsAddress::from_wots_pk(&pk).unwrap());

        // 40: address only
        let forty: Vec<u8> = (0u8..40).collect();
        let wa = WotsAddress::from_bytes(&forty).unwrap();
        assert_eq!(wa.to_bytes().as_slice(), forty.as_slice());
        assert_eq!(wa.amount(), 0);

        // 48: address with little-endian amount
        let mut forty_eight = forty.clone();
        forty_eight.extend_from_slice(&0x0102030405060708u64.to_le_bytes());
        let wa = WotsAddress::from_bytes(&forty_eight).unwrap();
        assert_eq!(wa.amount(), 0x0102030405060708);
        assert_eq!(wa.to_bytes_with_amount().as_slice(), forty_eight.as_slice());

        // anything else: zeroed
        let wa = WotsAddress::from_bytes(&[1u8, 2, 3]).unwrap();
        assert_eq!(wa, WotsAddress::default());
    }

    #[test]
    fn test_base58_tag_vector() {
        let tag = hex::decode("3f1fba7025c7d37470e7260117a72b7de9f5ca59").unwrap();
        let encoded = addr_tag_to_base58(&tag).unwrap();
        assert_eq!(encoded, "J8gqYehTJhJWrfcUd766sUQ8THktNs");
        assert!(validate_base58_tag(&encoded));
        assert_eq!(addr_tag_from_base58(&encoded).unwrap().as_slice(), &tag[..]);
    }

    #[test]
    fn test_base58_tag_rejects_any_single_char_flip() {
        let encoded = "J8gqYehTJhJWrfcUd766sUQ8THktNs";
        for i in 0..encoded.len() {
            let mut flipped: Vec<u8> = encoded.as_bytes().to_vec();
            flipped[i] = if flipped[i] == b'2' { b'3' } else { b'2' };
            let flipped = String::from_utf8(flipped).unwrap();
            assert!(!validate_base58_tag(&flipped), "flip at {i}");
        }
    }

    #[test]
    fn test_base58_zero_tag() {
        let encoded = addr_tag_to_base58(&[0u8; V3_TAG_LEN]).unwrap();
        assert_eq!(encoded, "1111111111111111111111");
        assert!(validate_base58_tag(&encoded));
    }

    #[test]
    fn test_base58_tag_roundtrip() {
        let tags = [[0x01u8; V3_TAG_LEN], [0xFEu8; V3_TAG_LEN]];
        for tag in &tags {
            let encoded = addr_tag_to_base58(tag).unwrap();
            assert_eq!(&addr_tag_from_base58(&encoded).unwrap(), tag);
        }
    }

    #[test]
    fn test_base58_tag_errors() {
        // malformed base58
        assert!(matches!(
            addr_tag_from_base58("0invalid"),
            Err(CryptoError::InvalidBase58)
        ));
        // wrong decoded length
        assert!(matches!(
            addr_tag_from_base58("11"),
            Err(CryptoError::InvalidBase58)
        ));
        // valid base58, correct length, broken checksum
        let mut payload = [0x07u8; V3_TAG_LEN + 2];
        let crc = crc16(&payload[..V3_TAG_LEN]);
        payload[V3_TAG_LEN] = (crc & 0xFF) as u8 ^ 0x01;
        payload[V3_TAG_LEN + 1] = (crc >> 8) as u8;
        let encoded = mcm_utils::base58::encode(&payload);
        assert!(matches!(
            addr_tag_from_base58(&encoded),
            Err(CryptoError::ChecksumMismatch)
        ));
    }
}
