pub mod ax;
pub mod ex;
pub mod gf256;
pub mod hash;
pub mod keystream;
pub mod shamir;

use adss_types::access::AccessStructure;
use adss_types::constants::RANDOMNESS_LEN;
use adss_types::error::{AdssError, AdssResult};
use adss_types::share::SecretShare;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

pub use ax::share_with_randomness;
pub use ex::{recover_with_options, Recovery, RecoveryOptions};

/// Split `message` into `access.count` shares bound to `associated_data`,
/// drawing the sharing randomness from the operating system.
pub fn share(
    access: &AccessStructure,
    message: &[u8],
    associated_data: &[u8],
) -> AdssResult<Vec<SecretShare>> {
    share_with_rng(access, message, associated_data, &mut OsRng)
}

/// [`share`] with a caller-supplied random source.
pub fn share_with_rng<R: RngCore + CryptoRng>(
    access: &AccessStructure,
    message: &[u8],
    associated_data: &[u8],
    rng: &mut R,
) -> AdssResult<Vec<SecretShare>> {
    access.validate()?;

    let mut randomness = Zeroizing::new([0u8; RANDOMNESS_LEN]);
    rng.try_fill_bytes(&mut *randomness)
        .map_err(|e| AdssError::RandomSource {
            reason: e.to_string(),
        })?;

    tracing::debug!(
        threshold = access.threshold,
        count = access.count,
        message_len = message.len(),
        "sharing message"
    );
    let shares = share_with_randomness(access, message, randomness.as_slice(), associated_data)?;
    tracing::debug!(shares = shares.len(), "sharing complete");

    Ok(shares)
}

/// Recover the message from `shares` with default [`RecoveryOptions`].
pub fn recover(shares: &[SecretShare]) -> AdssResult<Recovery> {
    recover_with_options(shares, &RecoveryOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source exhausted"))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn test_share_and_recover() {
        let access = AccessStructure::new(2, 3);
        let shares = share(&access, b"hello world", b"ad").unwrap();
        assert_eq!(shares.len(), 3);

        let recovery = recover(&shares[1..]).unwrap();
        assert_eq!(recovery.message, b"hello world");
        assert_eq!(recovery.valid_shares, shares[1..].to_vec());
    }

    #[test]
    fn test_fresh_randomness_per_sharing() {
        let access = AccessStructure::new(2, 3);
        let a = share(&access, b"same", b"ad").unwrap();
        let b = share(&access, b"same", b"ad").unwrap();
        assert_ne!(a[0].public.d, b[0].public.d);
    }

    #[test]
    fn test_share_with_seeded_rng_is_reproducible() {
        let access = AccessStructure::new(3, 5);
        let a = share_with_rng(&access, b"msg", b"ad", &mut StdRng::seed_from_u64(7)).unwrap();
        let b = share_with_rng(&access, b"msg", b"ad", &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].public.d.len(), RANDOMNESS_LEN);
    }

    #[test]
    fn test_random_source_failure() {
        let result = share_with_rng(&AccessStructure::new(2, 3), b"msg", b"", &mut FailingRng);
        assert!(matches!(result, Err(AdssError::RandomSource { .. })));
    }

    #[test]
    fn test_share_rejects_invalid_access_structure() {
        assert_eq!(
            share(&AccessStructure::new(3, 2), b"msg", b""),
            Err(AdssError::InvalidAccessStructure {
                threshold: 3,
                count: 2
            })
        );
    }
}
