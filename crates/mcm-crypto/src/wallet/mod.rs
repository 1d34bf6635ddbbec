//! Wallet facade over the WOTS+ scheme.
//!
//! A wallet owns the derived signing seed and the assembled 2208-byte
//! address, signs 32-byte message digests, and verifies signatures against
//! its own public key. Key material is wiped on [`clear`](Wallet::clear)
//! and on drop.

use mcm_types::CryptoError;
use mcm_utils::hex;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::addr::{self, WotsAddress, ADDRESS_LEN, LEGACY_TAG_LEN, V3_TAG_LEN};
use crate::hash::Sha256;
use crate::wots::{self, PARAMSN};

/// Deterministically derived key material for one wallet.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct WalletComponents {
    pub private_seed: [u8; PARAMSN],
    pub public_seed: [u8; PARAMSN],
    pub addr_seed: [u8; PARAMSN],
}

/// Pluggable derivation from a caller secret to wallet components.
/// Identical inputs must produce identical outputs.
pub type ComponentGenerator = fn(&[u8]) -> Result<WalletComponents, CryptoError>;

/// Byte-filling callback for the randomized paths.
pub type RandomGenerator = fn(&mut [u8]) -> Result<(), CryptoError>;

/// Default random generator backed by the operating system.
pub fn os_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    getrandom::getrandom(buf).map_err(|_| CryptoError::RandFail)
}

fn derive_component(secret: &[u8], role: &[u8]) -> Result<[u8; PARAMSN], CryptoError> {
    let mut h = Sha256::new();
    h.update(secret)?;
    h.update(role)?;
    h.finish()
}

/// Default component generator: each component is the SHA-256 of the
/// secret octets followed by a role literal. The secret is used as a raw
/// octet sequence; bytes outside the ASCII range pass through unchanged.
pub fn default_components(secret: &[u8]) -> Result<WalletComponents, CryptoError> {
    if secret.len() != PARAMSN {
        return Err(CryptoError::InvalidLength {
            field: "secret",
            expected: PARAMSN,
            got: secret.len(),
        });
    }
    Ok(WalletComponents {
        private_seed: derive_component(secret, b"seed")?,
        public_seed: derive_component(secret, b"publ")?,
        addr_seed: derive_component(secret, b"addr")?,
    })
}

/// A wallet bound to one WOTS+ key pair.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Wallet {
    #[zeroize(skip)]
    name: Option<String>,
    /// Derived private seed, the signing secret for both tag flavors.
    secret: Option<Vec<u8>>,
    /// Assembled 2208-byte address.
    wots: Option<Vec<u8>>,
    /// Legacy 12-byte or v3 20-byte tag.
    tag: Option<Vec<u8>>,
    #[zeroize(skip)]
    address_hex: Option<String>,
    #[zeroize(skip)]
    tag_hex: Option<String>,
    #[zeroize(skip)]
    wots_addr: WotsAddress,
}

impl Wallet {
    /// Create a wallet from a 32-byte secret using the default component
    /// generator. `tag` may be a legacy 12-byte tag (embedded into the
    /// address) or a v3 20-byte tag (stored alongside it).
    pub fn create(
        name: Option<&str>,
        secret: &[u8],
        tag: Option<&[u8]>,
    ) -> Result<Self, CryptoError> {
        Self::create_with(name, secret, tag, default_components)
    }

    /// Create a wallet with a caller-supplied component generator.
    pub fn create_with(
        name: Option<&str>,
        secret: &[u8],
        tag: Option<&[u8]>,
        generator: ComponentGenerator,
    ) -> Result<Self, CryptoError> {
        if secret.len() != PARAMSN {
            return Err(CryptoError::InvalidLength {
                field: "secret",
                expected: PARAMSN,
                got: secret.len(),
            });
        }
        if let Some(t) = tag {
            match t.len() {
                LEGACY_TAG_LEN => {
                    if !addr::tag_is_valid(t) {
                        return Err(CryptoError::InvalidTag);
                    }
                }
                V3_TAG_LEN => {}
                _ => return Err(CryptoError::InvalidTag),
            }
        }

        let components = generator(secret)?;

        // A legacy tag participates in key generation through the addr-seed
        // slot, so the stored public key matches the rnd2 used at signing
        // and verification time.
        let mut addr_seed = components.addr_seed;
        if let Some(t) = tag {
            if t.len() == LEGACY_TAG_LEN {
                addr_seed[PARAMSN - LEGACY_TAG_LEN..].copy_from_slice(t);
            }
        }

        let pk = wots::pkgen(&components.private_seed, &components.public_seed, &addr_seed)?;

        let mut address = Vec::with_capacity(ADDRESS_LEN);
        address.extend_from_slice(&pk);
        address.extend_from_slice(&components.public_seed);
        address.extend_from_slice(&addr_seed);

        let hash = addr::addr_hash(&pk)?;
        let v3_tag: [u8; V3_TAG_LEN] = match tag {
            Some(t) if t.len() == V3_TAG_LEN => {
                let mut v3 = [0u8; V3_TAG_LEN];
                v3.copy_from_slice(t);
                v3
            }
            _ => hash,
        };
        let tag_bytes: Vec<u8> = match tag {
            Some(t) => t.to_vec(),
            None => hash.to_vec(),
        };

        let wots_addr = WotsAddress::new(&v3_tag, &hash)?;
        let address_hex = hex::encode(&address);
        let tag_hex = hex::encode(&tag_bytes);

        Ok(Self {
            name: name.map(String::from),
            secret: Some(components.private_seed.to_vec()),
            wots: Some(address),
            tag: Some(tag_bytes),
            address_hex: Some(address_hex),
            tag_hex: Some(tag_hex),
            wots_addr,
        })
    }

    /// Create a wallet from a random secret sourced through `rng`.
    pub fn random(
        name: Option<&str>,
        tag: Option<&[u8]>,
        rng: RandomGenerator,
    ) -> Result<Self, CryptoError> {
        let mut secret = [0u8; PARAMSN];
        rng(&mut secret)?;
        let wallet = Self::create(name, &secret, tag);
        secret.zeroize();
        wallet
    }

    /// Sign a 32-byte message digest.
    pub fn sign(&self, digest: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if digest.len() != PARAMSN {
            return Err(CryptoError::InvalidLength {
                field: "message digest",
                expected: PARAMSN,
                got: digest.len(),
            });
        }
        let secret = self.secret.as_deref().ok_or(CryptoError::MissingSecret)?;
        let address = self.wots.as_deref().ok_or(CryptoError::MissingAddress)?;
        let (_, pub_seed, rnd2) = addr::split_address(address)?;
        wots::sign(digest, secret, pub_seed, rnd2)
    }

    /// Verify a 2144-byte signature over a 32-byte message digest against
    /// this wallet's public key. Cryptographic mismatch returns `false`;
    /// malformed inputs fail with the typed error.
    pub fn verify(&self, digest: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let address = self.wots.as_deref().ok_or(CryptoError::MissingAddress)?;
        let (pk, pub_seed, rnd2) = addr::split_address(address)?;
        let recovered = wots::pk_from_sig(signature, digest, pub_seed, rnd2)?;
        Ok(recovered.as_slice().ct_eq(pk).into())
    }

    /// Sign and verify `rounds` fresh random digests. Probabilistic
    /// self-check for the paranoid; not run by `create`.
    pub fn self_check(&self, rounds: usize, rng: RandomGenerator) -> Result<bool, CryptoError> {
        for _ in 0..rounds {
            let mut digest = [0u8; PARAMSN];
            rng(&mut digest)?;
            let signature = self.sign(&digest)?;
            if !self.verify(&digest, &signature)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Wipe key material and detach the address and tag.
    pub fn clear(&mut self) {
        self.secret.zeroize();
        self.wots.zeroize();
        self.tag.zeroize();
        self.secret = None;
        self.wots = None;
        self.tag = None;
        self.name = None;
        self.address_hex = None;
        self.tag_hex = None;
        self.wots_addr = WotsAddress::default();
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// The 2208-byte wallet address.
    pub fn address(&self) -> Option<&[u8]> {
        self.wots.as_deref()
    }

    /// The stored tag: legacy 12 bytes, or v3 20 bytes.
    pub fn tag(&self) -> Option<&[u8]> {
        self.tag.as_deref()
    }

    pub fn address_hex(&self) -> Option<&str> {
        self.address_hex.as_deref()
    }

    pub fn tag_hex(&self) -> Option<&str> {
        self.tag_hex.as_deref()
    }

    /// The derived 40-byte v3 address with its tag.
    pub fn wots_address(&self) -> &WotsAddress {
        &self.wots_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    fn fixture_components(secret: &[u8]) -> Result<WalletComponents, CryptoError> {
        let _ = secret;
        Ok(WalletComponents {
            private_seed: [0x01u8; PARAMSN],
            public_seed: [0x02u8; PARAMSN],
            addr_seed: [0x03u8; PARAMSN],
        })
    }

    fn fill_a5(buf: &mut [u8]) -> Result<(), CryptoError> {
        buf.fill(0xA5);
        Ok(())
    }

    #[test]
    fn test_create_deterministic() {
        let secret = [0x12u8; 32];
        let tag = [0x34u8; 20];
        let w1 = Wallet::create(Some("one"), &secret, Some(&tag)).unwrap();
        let w2 = Wallet::create(Some("two"), &secret, Some(&tag)).unwrap();
        assert_eq!(w1.address(), w2.address());
        assert_eq!(w1.tag(), w2.tag());
        assert_eq!(w1.tag().unwrap(), &tag);
    }

    #[test]
    fn test_create_address_fingerprint() {
        let wallet = Wallet::create(None, &[0x12u8; 32], None).unwrap();
        let address = wallet.address().unwrap();
        assert_eq!(address.len(), ADDRESS_LEN);
        assert_eq!(
            hex::encode(&sha256(address).unwrap()),
            "e1fea48484306faf1f02af7b93fbacbe4a7d1d0db341da352d0e93c2ac4369dc"
        );
        // default tag is the address hash of the public key
        assert_eq!(
            wallet.tag_hex().unwrap(),
            "5d3d0bcb460c940b453cf6b11f984b8b08594d96"
        );
        assert_eq!(wallet.tag().unwrap(), wallet.wots_address().tag());
        assert_eq!(
            wallet.wots_address().tag(),
            wallet.wots_address().address_hash()
        );
    }

    #[test]
    fn test_create_rejects_bad_inputs() {
        assert!(matches!(
            Wallet::create(None, &[0u8; 31], None),
            Err(CryptoError::InvalidLength { field: "secret", .. })
        ));
        assert!(matches!(
            Wallet::create(None, &[0x12u8; 32], Some(&[0x41u8; 13])),
            Err(CryptoError::InvalidTag)
        ));
        assert!(matches!(
            Wallet::create(None, &[0x12u8; 32], Some(&[0x42u8; 12])),
            Err(CryptoError::InvalidTag)
        ));
        assert!(matches!(
            Wallet::create(None, &[0x12u8; 32], Some(&[0x00u8; 12])),
            Err(CryptoError::InvalidTag)
        ));
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let wallet = Wallet::create(Some("main"), &[0x12u8; 32], None).unwrap();
        let digest = sha256(b"a payload hashed by the caller").unwrap();
        let signature = wallet.sign(&digest).unwrap();
        assert_eq!(signature.len(), wots::WOTSSIGBYTES);
        assert!(wallet.verify(&digest, &signature).unwrap());

        let mut flipped = digest;
        flipped[0] ^= 0x01;
        assert!(!wallet.verify(&flipped, &signature).unwrap());

        let mut bad_sig = signature.clone();
        bad_sig[7] ^= 0x80;
        assert!(!wallet.verify(&digest, &bad_sig).unwrap());
    }

    #[test]
    fn test_legacy_tag_wallet() {
        let tag = [0x41u8; 12];
        let wallet = Wallet::create(None, &[0x12u8; 32], Some(&tag)).unwrap();
        // the tag occupies the last 12 bytes of the address
        let address = wallet.address().unwrap();
        assert_eq!(&address[ADDRESS_LEN - LEGACY_TAG_LEN..], &tag);
        assert_eq!(addr::tag_extract(address).unwrap(), tag);
        assert_eq!(wallet.tag().unwrap(), &tag);

        // signatures still round-trip with the embedded tag
        let digest = [0x77u8; 32];
        let signature = wallet.sign(&digest).unwrap();
        assert!(wallet.verify(&digest, &signature).unwrap());
    }

    #[test]
    fn test_component_generator_plugs_in() {
        let w1 = Wallet::create_with(None, &[0x55u8; 32], None, fixture_components).unwrap();
        let w2 = Wallet::create_with(None, &[0x66u8; 32], None, fixture_components).unwrap();
        // the fixture ignores the secret, so both wallets coincide
        assert_eq!(w1.address(), w2.address());

        let w3 = Wallet::create(None, &[0x55u8; 32], None).unwrap();
        assert_ne!(w1.address(), w3.address());
    }

    #[test]
    fn test_verify_requires_well_formed_signature() {
        let wallet = Wallet::create(None, &[0x12u8; 32], None).unwrap();
        assert!(matches!(
            wallet.verify(&[0u8; 32], &[0u8; 100]),
            Err(CryptoError::InvalidLength {
                field: "signature",
                ..
            })
        ));
        assert!(matches!(
            wallet.sign(&[0u8; 31]),
            Err(CryptoError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_random_wallet_uses_callback() {
        let w1 = Wallet::random(None, None, fill_a5).unwrap();
        let w2 = Wallet::create(None, &[0xA5u8; 32], None).unwrap();
        assert_eq!(w1.address(), w2.address());
    }

    #[test]
    fn test_self_check() {
        let wallet = Wallet::create(None, &[0x12u8; 32], None).unwrap();
        assert!(wallet.self_check(2, fill_a5).unwrap());
        assert!(wallet.self_check(2, os_random).unwrap());
    }

    #[test]
    fn test_clear_wipes_state() {
        let mut wallet = Wallet::create(Some("gone"), &[0x12u8; 32], None).unwrap();
        wallet.clear();
        assert!(!wallet.has_secret());
        assert!(wallet.address().is_none());
        assert!(wallet.tag().is_none());
        assert!(wallet.name().is_none());
        assert!(wallet.address_hex().is_none());
        assert_eq!(wallet.wots_address(), &WotsAddress::default());
        assert!(matches!(
            wallet.sign(&[0u8; 32]),
            Err(CryptoError::MissingSecret)
        ));
        assert!(matches!(
            wallet.verify(&[0u8; 32], &[0u8; 2144]),
            Err(CryptoError::MissingAddress)
        ));
    }
}
