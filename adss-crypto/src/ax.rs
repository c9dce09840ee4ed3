//! The AX transform: one-shot authenticated sharing over the base scheme.
//!
//! Sharing hashes `(access, message, randomness, tag)` into `J` and `K`,
//! encrypts the message and randomness under `K`, and Shamir-splits `K`.
//! Recovery reverses this and accepts only if the recovered inputs hash to
//! the same `J` and `K` and re-sharing them reproduces the presented shares.

use adss_types::access::AccessStructure;
use adss_types::error::{AdssError, AdssResult};
use adss_types::share::{PublicData, SecretShare};

use crate::hash::compute_jkl;
use crate::keystream::{decrypt_two, encrypt_two};
use crate::shamir::{self, BaseShare};

/// Deterministically share `message` using the given randomness.
pub fn share_with_randomness(
    access: &AccessStructure,
    message: &[u8],
    randomness: &[u8],
    tag: &[u8],
) -> AdssResult<Vec<SecretShare>> {
    access.validate()?;

    let binding = compute_jkl(access, message, randomness, tag);
    let (c, d) = encrypt_two(binding.k.as_slice(), message, randomness)?;
    let base_shares = shamir::split(access, binding.k.as_slice(), randomness, tag)?;

    let public = PublicData {
        c,
        d,
        j: binding.j.to_vec(),
    };

    Ok(base_shares
        .into_iter()
        .map(|base| SecretShare {
            access: *access,
            id: base.index,
            public: public.clone(),
            secret: base.secret,
            tag: tag.to_vec(),
        })
        .collect())
}

fn to_base_share(share: &SecretShare) -> BaseShare {
    BaseShare {
        index: share.id,
        threshold: share.access.threshold,
        count: share.access.count,
        secret: share.secret.clone(),
    }
}

/// Recover the message from a consistent subset of shares.
///
/// The access structure, public data and tag are taken from the first share;
/// callers are expected to have checked the subset for consistency.
pub fn ax_recover(shares: &[SecretShare]) -> AdssResult<Vec<u8>> {
    let refs: Vec<&SecretShare> = shares.iter().collect();
    recover_subset(&refs)
}

/// [`ax_recover`] over borrowed shares, so candidate subsets need no copies.
pub(crate) fn recover_subset(shares: &[&SecretShare]) -> AdssResult<Vec<u8>> {
    let first = shares.first().ok_or(AdssError::NoSharesProvided)?;
    let access = first.access;
    access.validate()?;

    let base_shares: Vec<BaseShare> = shares.iter().map(|s| to_base_share(s)).collect();
    let key = shamir::combine(&base_shares)?;

    let (message, randomness) = decrypt_two(&key, &first.public.c, &first.public.d)?;

    let binding = compute_jkl(&access, &message, &randomness, &first.tag);
    if binding.j.as_slice() != first.public.j.as_slice() || binding.k.as_slice() != key.as_slice()
    {
        return Err(AdssError::ChecksumFailure);
    }

    let ids: Vec<u8> = shares.iter().map(|s| s.id).collect();
    if !access.supports_ids(&ids) {
        return Err(AdssError::MalformedShare {
            reason: format!("unsupported share ids: {:?}", ids),
        });
    }

    // The hashes matched, so these inputs were valid when shared; failing to
    // share them again is a bug here, not bad input.
    let reshares = share_with_randomness(&access, &message, &randomness, &first.tag).map_err(
        |e| AdssError::Internal {
            reason: format!("resharing recovered parameters failed: {}", e),
        },
    )?;

    let is_reshare = shares.iter().all(|s| {
        reshares
            .get(usize::from(s.id))
            .is_some_and(|fresh| fresh == *s)
    });
    if !is_reshare {
        return Err(AdssError::NotAReshare);
    }

    Ok(message)
}
