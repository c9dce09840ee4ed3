use adss_types::access::AccessStructure;
use adss_types::constants::TAG_J_LEN;
use adss_types::primitives::Digest;
use sha2::{Digest as _, Sha256};
use zeroize::Zeroizing;

/// Domain separators prefixed to the shared hash input.
const DOMAIN_J1: u8 = 1;
const DOMAIN_J2: u8 = 2;
const DOMAIN_K: u8 = 3;
const DOMAIN_L: u8 = 4;

/// The three digests binding a sharing to its inputs.
pub struct Binding {
    /// Public integrity tag, `H(1 || x) || H(2 || x)`.
    pub j: [u8; TAG_J_LEN],
    /// Encryption key, `H(3 || x)`.
    pub k: Zeroizing<Digest>,
    /// Reserved key material, `H(4 || x)`. Not consumed by sharing or recovery.
    pub l: Zeroizing<Digest>,
}

/// SHA-256 of `domain || input`.
pub fn domain_digest(domain: u8, input: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update([domain]);
    hasher.update(input);
    hasher.finalize().into()
}

/// Compute `J`, `K` and `L` over `access || message || randomness || tag`.
pub fn compute_jkl(
    access: &AccessStructure,
    message: &[u8],
    randomness: &[u8],
    tag: &[u8],
) -> Binding {
    let access_bytes = access.to_bytes();
    let mut input = Zeroizing::new(Vec::with_capacity(
        access_bytes.len() + message.len() + randomness.len() + tag.len(),
    ));
    input.extend_from_slice(&access_bytes);
    input.extend_from_slice(message);
    input.extend_from_slice(randomness);
    input.extend_from_slice(tag);

    let mut j = [0u8; TAG_J_LEN];
    j[..32].copy_from_slice(&domain_digest(DOMAIN_J1, &input));
    j[32..].copy_from_slice(&domain_digest(DOMAIN_J2, &input));

    Binding {
        j,
        k: Zeroizing::new(domain_digest(DOMAIN_K, &input)),
        l: Zeroizing::new(domain_digest(DOMAIN_L, &input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        let b = compute_jkl(&AccessStructure::new(2, 3), b"msg", b"rnd", b"ad");
        assert_eq!(
            hex::encode(b.j),
            concat!(
                "219e33601e4e308894190b90fe9c3e243782da438ad52e709c4d3631e89519a9",
                "ed4c3f8143cb321a327edf1afbf5b61729aebaf1a29d8f30c6eb30460128ab2e"
            )
        );
        assert_eq!(
            hex::encode(b.k.as_slice()),
            "e7025fe592316c86ca0a0054d1dbc56b3154112a8e749b7eca914a9ad2c14e9d"
        );
        assert_eq!(
            hex::encode(b.l.as_slice()),
            "4181a8e52c3dd5d4481e711f61f81f151fd3fb113f26864307372683d832abfd"
        );
    }

    #[test]
    fn test_digests_are_distinct() {
        let b = compute_jkl(&AccessStructure::new(2, 3), b"m", b"r", b"t");
        assert_ne!(&b.j[..32], &b.j[32..]);
        assert_ne!(&b.j[..32], b.k.as_slice());
        assert_ne!(b.k.as_slice(), b.l.as_slice());
    }

    #[test]
    fn test_every_input_is_bound() {
        let base = compute_jkl(&AccessStructure::new(2, 3), b"m", b"r", b"t");
        let variants = [
            compute_jkl(&AccessStructure::new(2, 4), b"m", b"r", b"t"),
            compute_jkl(&AccessStructure::new(2, 3), b"M", b"r", b"t"),
            compute_jkl(&AccessStructure::new(2, 3), b"m", b"R", b"t"),
            compute_jkl(&AccessStructure::new(2, 3), b"m", b"r", b"T"),
        ];
        for v in &variants {
            assert_ne!(base.j, v.j);
            assert_ne!(*base.k, *v.k);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = compute_jkl(&AccessStructure::new(3, 5), b"m", b"r", b"t");
        let b = compute_jkl(&AccessStructure::new(3, 5), b"m", b"r", b"t");
        assert_eq!(a.j, b.j);
        assert_eq!(*a.k, *b.k);
        assert_eq!(*a.l, *b.l);
    }
}
