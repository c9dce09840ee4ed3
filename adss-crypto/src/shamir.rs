//! Byte-wise Shamir secret sharing over GF(256).
//!
//! Each byte of the secret becomes the constant term of its own polynomial
//! of degree `t - 1`. The higher coefficients come from an HKDF-SHA256
//! stream keyed by a caller-supplied seed, so a sharing is fully
//! determined by `(access structure, secret, seed, info)`.

use adss_types::access::AccessStructure;
use adss_types::constants::MIN_THRESHOLD;
use adss_types::error::{AdssError, AdssResult};
use adss_types::primitives::ShareId;
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::gf256::{self, Polynomial};

/// A single base-layer share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseShare {
    /// Share index; the polynomial was evaluated at `index + 1`.
    pub index: ShareId,
    /// Threshold of the sharing that produced this share.
    pub threshold: u8,
    /// Number of shares in that sharing.
    pub count: u8,
    /// One evaluation per secret byte.
    pub secret: Vec<u8>,
}

/// Derive `len` pseudorandom coefficient bytes from `seed`, domain-separated
/// by `info`.
pub fn coefficient_stream(seed: &[u8], info: &[u8], len: usize) -> AdssResult<Zeroizing<Vec<u8>>> {
    let prf = Hkdf::<Sha256>::new(None, seed);
    let mut stream = Zeroizing::new(vec![0u8; len]);
    prf.expand(info, &mut stream)
        .map_err(|_| AdssError::CoefficientStream {
            reason: format!("cannot derive {} bytes from HKDF-SHA256", len),
        })?;
    Ok(stream)
}

/// Split `secret` into `access.count` shares, any `access.threshold` of
/// which recover it.
///
/// # Errors
/// Returns an error if the access structure is invalid or the secret is too
/// long for the coefficient stream (`len * (t - 1)` must not exceed 8160).
pub fn split(
    access: &AccessStructure,
    secret: &[u8],
    seed: &[u8],
    info: &[u8],
) -> AdssResult<Vec<BaseShare>> {
    access.validate()?;

    let degree = usize::from(access.threshold) - 1;
    let stream = coefficient_stream(seed, info, secret.len() * degree)?;

    let count = usize::from(access.count);
    let mut evaluations = vec![vec![0u8; secret.len()]; count];

    for (i, (&byte, coefficients)) in secret.iter().zip(stream.chunks_exact(degree)).enumerate() {
        let poly = Polynomial::new(byte, coefficients);
        for (j, evaluation) in evaluations.iter_mut().enumerate() {
            // Evaluating at zero would hand out the secret byte itself.
            evaluation[i] = poly.evaluate(j as u8 + 1);
        }
    }

    Ok(evaluations
        .into_iter()
        .enumerate()
        .map(|(j, secret)| BaseShare {
            index: j as ShareId,
            threshold: access.threshold,
            count: access.count,
            secret,
        })
        .collect())
}

/// Recover the secret from base shares by interpolating every byte at zero.
///
/// All supplied shares take part in the interpolation. The threshold is read
/// from the first share and is not cross-checked against the others.
pub fn combine(shares: &[BaseShare]) -> AdssResult<Zeroizing<Vec<u8>>> {
    let first = shares.first().ok_or(AdssError::InsufficientShares {
        provided: 0,
        required: usize::from(MIN_THRESHOLD),
    })?;
    let required = usize::from(first.threshold);
    if shares.len() < required {
        return Err(AdssError::InsufficientShares {
            provided: shares.len(),
            required,
        });
    }

    let len = first.secret.len();
    let mut xs = Vec::with_capacity(shares.len());
    for share in shares {
        if share.secret.len() != len {
            return Err(AdssError::MalformedShare {
                reason: format!(
                    "share {} has {} secret bytes, expected {}",
                    share.index,
                    share.secret.len(),
                    len
                ),
            });
        }
        let x = share
            .index
            .checked_add(1)
            .ok_or_else(|| AdssError::MalformedShare {
                reason: format!("share index {} out of range", share.index),
            })?;
        xs.push(x);
    }

    let mut secret = Zeroizing::new(Vec::with_capacity(len));
    let mut points = Vec::with_capacity(shares.len());
    for i in 0..len {
        points.clear();
        points.extend(xs.iter().zip(shares).map(|(&x, s)| (x, s.secret[i])));
        let byte = gf256::interpolate(&points, 0).ok_or(AdssError::MalformedShare {
            reason: "duplicate share index".to_string(),
        })?;
        secret.push(byte);
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SEED: &[u8] = b"this is very random";
    const INFO: &[u8] = b"some associated data";

    #[test]
    fn test_split_and_combine_2_of_3() {
        let secret = b"abc";
        let shares = split(&AccessStructure::new(2, 3), secret, SEED, INFO).unwrap();
        assert_eq!(shares.len(), 3);
        for (i, share) in shares.iter().enumerate() {
            assert_eq!(share.index as usize, i);
            assert_eq!(share.secret.len(), secret.len());
        }

        let recovered = combine(&shares).unwrap();
        assert_eq!(recovered.as_slice(), secret);
    }

    #[test]
    fn test_any_threshold_subset_recovers() {
        let secret = [0xABu8; 32];
        let shares = split(&AccessStructure::new(3, 5), &secret, SEED, INFO).unwrap();

        for subset in [[0, 1, 2], [0, 2, 4], [1, 3, 4], [2, 3, 4]] {
            let picked: Vec<BaseShare> = subset.iter().map(|&i| shares[i].clone()).collect();
            assert_eq!(combine(&picked).unwrap().as_slice(), &secret);
        }
    }

    #[test]
    fn test_split_is_deterministic() {
        let access = AccessStructure::new(2, 4);
        let a = split(&access, b"secret", SEED, INFO).unwrap();
        let b = split(&access, b"secret", SEED, INFO).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_and_info_change_shares() {
        let access = AccessStructure::new(2, 3);
        let base = split(&access, b"secret", SEED, INFO).unwrap();
        let other_seed = split(&access, b"secret", b"other seed", INFO).unwrap();
        let other_info = split(&access, b"secret", SEED, b"other info").unwrap();
        assert_ne!(base, other_seed);
        assert_ne!(base, other_info);
    }

    #[test]
    fn test_shares_do_not_reveal_secret_bytes() {
        // With t >= 2 a share is a random-looking evaluation, not the secret.
        let secret = [0x42u8; 32];
        let shares = split(&AccessStructure::new(2, 3), &secret, SEED, INFO).unwrap();
        assert!(shares.iter().all(|s| s.secret != secret));
    }

    #[test]
    fn test_empty_secret() {
        let shares = split(&AccessStructure::new(2, 3), &[], SEED, INFO).unwrap();
        assert_eq!(shares.len(), 3);
        assert!(combine(&shares).unwrap().is_empty());
    }

    #[test]
    fn test_split_rejects_invalid_access_structure() {
        assert!(split(&AccessStructure::new(1, 3), b"x", SEED, INFO).is_err());
        assert!(split(&AccessStructure::new(4, 3), b"x", SEED, INFO).is_err());
    }

    #[test]
    fn test_split_rejects_oversized_stream() {
        // 8160 bytes is the HKDF-SHA256 output limit.
        let secret = vec![0u8; 100];
        let result = split(&AccessStructure::new(255, 255), &secret, SEED, INFO);
        assert!(matches!(result, Err(AdssError::CoefficientStream { .. })));
    }

    #[test]
    fn test_combine_insufficient_shares() {
        let shares = split(&AccessStructure::new(3, 5), b"abc", SEED, INFO).unwrap();
        assert_eq!(
            combine(&shares[..2]),
            Err(AdssError::InsufficientShares {
                provided: 2,
                required: 3
            })
        );
        assert!(matches!(
            combine(&[]),
            Err(AdssError::InsufficientShares { provided: 0, .. })
        ));
    }

    #[test]
    fn test_combine_mismatched_lengths() {
        let mut shares = split(&AccessStructure::new(2, 3), b"abc", SEED, INFO).unwrap();
        shares[1].secret.pop();
        assert!(matches!(
            combine(&shares),
            Err(AdssError::MalformedShare { .. })
        ));
    }

    #[test]
    fn test_combine_duplicate_and_overflowing_index() {
        let shares = split(&AccessStructure::new(2, 3), b"abc", SEED, INFO).unwrap();
        let dup = vec![shares[0].clone(), shares[0].clone()];
        assert!(matches!(combine(&dup), Err(AdssError::MalformedShare { .. })));

        let mut high = shares[1].clone();
        high.index = 255;
        assert!(matches!(
            combine(&[shares[0].clone(), high]),
            Err(AdssError::MalformedShare { .. })
        ));
    }

    #[test]
    fn test_combine_below_threshold_gives_wrong_secret() {
        // Forcing a lower threshold on the shares interpolates the wrong line.
        let secret = b"threshold";
        let shares = split(&AccessStructure::new(3, 4), secret, SEED, INFO).unwrap();
        let mut forged: Vec<BaseShare> = shares[..2].to_vec();
        for share in &mut forged {
            share.threshold = 2;
        }
        assert_ne!(combine(&forged).unwrap().as_slice(), secret);
    }

    #[test]
    fn test_coefficient_stream_rfc5869() {
        // RFC 5869 A.3: SHA-256 with no salt and empty info.
        let okm = coefficient_stream(&[0x0b; 22], &[], 42).unwrap();
        assert_eq!(
            hex::encode(okm.as_slice()),
            "8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d9d201395faa4b61a96c8"
        );
    }

    #[test]
    fn test_coefficient_stream_limit() {
        assert!(coefficient_stream(SEED, INFO, 255 * 32).is_ok());
        assert!(coefficient_stream(SEED, INFO, 255 * 32 + 1).is_err());
    }

    proptest! {
        #[test]
        fn prop_split_combine_roundtrip(
            secret in prop::collection::vec(any::<u8>(), 0..48),
            seed in prop::collection::vec(any::<u8>(), 0..40),
            (t, n) in (2u8..8).prop_flat_map(|t| (Just(t), t..12)),
        ) {
            let shares = split(&AccessStructure::new(t, n), &secret, &seed, INFO).unwrap();
            prop_assert_eq!(shares.len(), n as usize);
            let last: Vec<BaseShare> = shares[(n - t) as usize..].to_vec();
            let recovered = combine(&last).unwrap();
            prop_assert_eq!(recovered.as_slice(), secret.as_slice());
        }
    }
}
