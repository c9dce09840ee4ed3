//! The EX transform: error-correcting recovery over a pool of shares.
//!
//! Recovery validates the pool, then walks candidate subsets from the whole
//! pool down to threshold size. The first subset that passes AX recovery is
//! the explanation. Every later subset that is not contained in it is still
//! tried, and a second success means the pool cannot be explained uniquely.

use std::fmt;

use adss_types::access::AccessStructure;
use adss_types::constants::DEFAULT_MAX_CANDIDATES;
use adss_types::error::{AdssError, AdssResult};
use adss_types::share::SecretShare;
use rayon::prelude::*;

use crate::ax;

/// Largest batch of candidates held in memory by a parallel search.
const PARALLEL_CHUNK: usize = 1024;

/// Tuning knobs for [`recover_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryOptions {
    /// Evaluate each subset size group on the rayon thread pool.
    pub parallel: bool,
    /// Upper bound on the number of candidate subsets run through AX
    /// recovery. `None` disables it.
    pub max_candidates: Option<u64>,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            max_candidates: Some(DEFAULT_MAX_CANDIDATES),
        }
    }
}

/// A successful recovery: the message and the shares that explain it.
#[derive(Clone, PartialEq, Eq)]
pub struct Recovery {
    pub message: Vec<u8>,
    /// Pool entries forming the accepted explanation, in pool order.
    pub valid_shares: Vec<SecretShare>,
}

impl Recovery {
    /// Entries of `pool` that are not part of the explanation.
    pub fn excluded<'a>(&self, pool: &'a [SecretShare]) -> Vec<&'a SecretShare> {
        pool.iter()
            .filter(|share| !self.valid_shares.contains(share))
            .collect()
    }
}

impl fmt::Debug for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recovery")
            .field("message", &format_args!("<{} bytes>", self.message.len()))
            .field("valid_shares", &self.valid_shares)
            .finish()
    }
}

/// Every `k`-element combination of `0..len`, in lexicographic order.
///
/// Each combination is a strictly increasing list of positions, so the
/// relative order of the underlying pool is preserved.
#[derive(Debug, Clone)]
pub struct Subsets {
    len: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Subsets {
    pub fn new(len: usize, k: usize) -> Self {
        Self {
            len,
            indices: (0..k).collect(),
            done: k > len,
        }
    }
}

impl Iterator for Subsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        // Advance the rightmost position that still has room, then pack
        // everything after it tightly behind it.
        let k = self.indices.len();
        match (0..k).rev().find(|&i| self.indices[i] < self.len - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(current)
    }
}

/// `C(n, k)`, or `None` if an intermediate product overflows.
fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

/// Number of subsets of a `len`-share pool with at least `threshold`
/// members. Saturates at `u128::MAX`.
pub fn candidate_count(len: usize, threshold: usize) -> u128 {
    (threshold..=len)
        .map(|k| binomial(len, k))
        .try_fold(0u128, |total, count| total.checked_add(count?))
        .unwrap_or(u128::MAX)
}

/// Check that a pool can be searched at all and return its access structure.
pub fn validate_pool(shares: &[SecretShare]) -> AdssResult<AccessStructure> {
    let first = shares.first().ok_or(AdssError::NoSharesProvided)?;

    let mut seen = [false; 256];
    for share in shares {
        if share.access != first.access {
            return Err(AdssError::InconsistentAccessStructure);
        }
        if share.tag != first.tag {
            return Err(AdssError::InconsistentTag);
        }
        let slot = &mut seen[usize::from(share.id)];
        if *slot {
            return Err(AdssError::DuplicateId(share.id));
        }
        *slot = true;
    }

    first.access.validate()?;
    Ok(first.access)
}

/// Whether sorted `candidate` positions all appear in sorted `explanation`.
fn is_subset(candidate: &[usize], explanation: &[usize]) -> bool {
    candidate
        .iter()
        .all(|i| explanation.binary_search(i).is_ok())
}

fn ids_of(pool: &[SecretShare], positions: &[usize]) -> Vec<u8> {
    positions.iter().map(|&i| pool[i].id).collect()
}

fn attempt(pool: &[SecretShare], candidate: &[usize]) -> AdssResult<Vec<u8>> {
    let subset: Vec<&SecretShare> = candidate.iter().map(|&i| &pool[i]).collect();
    ax::recover_subset(&subset)
}

/// Running state of the explanation search.
struct Search<'a> {
    pool: &'a [SecretShare],
    explanation: Option<(Vec<usize>, Vec<u8>)>,
    last_err: Option<AdssError>,
    attempts: u64,
    max_attempts: Option<u64>,
    candidates: u128,
}

impl<'a> Search<'a> {
    fn new(pool: &'a [SecretShare], options: &RecoveryOptions, candidates: u128) -> Self {
        Self {
            pool,
            explanation: None,
            last_err: None,
            attempts: 0,
            max_attempts: options.max_candidates,
            candidates,
        }
    }

    /// The explanation already uses every share, so nothing can contradict it.
    fn is_complete(&self) -> bool {
        self.explanation
            .as_ref()
            .is_some_and(|(accepted, _)| accepted.len() == self.pool.len())
    }

    fn over_budget(&self) -> AdssError {
        AdssError::TooManyCandidates {
            candidates: self.candidates,
            max: self.max_attempts.unwrap_or(u64::MAX),
        }
    }

    /// How many more candidates may be attempted.
    fn remaining_budget(&self) -> u64 {
        self.max_attempts
            .map_or(u64::MAX, |max| max.saturating_sub(self.attempts))
    }

    /// Subsets of the accepted explanation cannot change the outcome.
    fn needs_attempt(&self, candidate: &[usize]) -> bool {
        match &self.explanation {
            None => true,
            Some((accepted, _)) => !is_subset(candidate, accepted),
        }
    }

    fn observe(&mut self, candidate: Vec<usize>, outcome: AdssResult<Vec<u8>>) -> AdssResult<()> {
        match outcome {
            Err(e) if e.is_internal() => Err(e),
            Err(e) => {
                tracing::trace!(
                    ids = ?ids_of(self.pool, &candidate),
                    reason = %e,
                    "candidate rejected"
                );
                if self.explanation.is_none() {
                    self.last_err = Some(e);
                }
                Ok(())
            }
            Ok(message) => match &self.explanation {
                None => {
                    tracing::debug!(
                        ids = ?ids_of(self.pool, &candidate),
                        "explanation accepted"
                    );
                    self.explanation = Some((candidate, message));
                    Ok(())
                }
                Some((accepted, _)) => {
                    let first = ids_of(self.pool, accepted);
                    let second = ids_of(self.pool, &candidate);
                    tracing::warn!(?first, ?second, "second explanation found");
                    Err(AdssError::AmbiguousRecovery { first, second })
                }
            },
        }
    }

    fn run_sequential(&mut self, group: &mut Subsets) -> AdssResult<()> {
        for candidate in group {
            if !self.needs_attempt(&candidate) {
                continue;
            }
            if self.remaining_budget() == 0 {
                return Err(self.over_budget());
            }
            self.attempts += 1;
            let outcome = attempt(self.pool, &candidate);
            self.observe(candidate, outcome)?;
        }
        Ok(())
    }

    /// Evaluate a size group concurrently in chunks of at most
    /// [`PARALLEL_CHUNK`] candidates, folding each chunk's outcomes in
    /// enumeration order so the result matches [`Search::run_sequential`].
    ///
    /// Within one size group no candidate is a subset of another, so the
    /// skip decisions taken while filling a chunk stay valid throughout it.
    fn run_parallel(&mut self, group: &mut Subsets) -> AdssResult<()> {
        loop {
            let limit = usize::try_from(self.remaining_budget())
                .unwrap_or(usize::MAX)
                .min(PARALLEL_CHUNK);
            let mut chunk: Vec<Vec<usize>> = Vec::with_capacity(limit);
            while chunk.len() < limit {
                match group.next() {
                    Some(candidate) if self.needs_attempt(&candidate) => chunk.push(candidate),
                    Some(_) => {}
                    None => break,
                }
            }

            if chunk.is_empty() {
                // Out of budget: only fail if something was still left to try.
                if limit == 0 && group.any(|candidate| self.needs_attempt(&candidate)) {
                    return Err(self.over_budget());
                }
                return Ok(());
            }

            let pool = self.pool;
            let outcomes: Vec<AdssResult<Vec<u8>>> =
                chunk.par_iter().map(|c| attempt(pool, c)).collect();

            for (candidate, outcome) in chunk.into_iter().zip(outcomes) {
                if !self.needs_attempt(&candidate) {
                    continue;
                }
                self.attempts += 1;
                self.observe(candidate, outcome)?;
            }
        }
    }

    fn finish(self, threshold: usize) -> AdssResult<Recovery> {
        match self.explanation {
            Some((positions, message)) => Ok(Recovery {
                message,
                valid_shares: positions.iter().map(|&i| self.pool[i].clone()).collect(),
            }),
            None => {
                let cause = self.last_err.unwrap_or(AdssError::InsufficientShares {
                    provided: self.pool.len(),
                    required: threshold,
                });
                Err(AdssError::NoExplanationFound(Box::new(cause)))
            }
        }
    }
}

/// Recover the message from a pool that may contain corrupted shares.
///
/// # Errors
/// Pool validation errors are returned as-is. Otherwise the search fails
/// with [`AdssError::NoExplanationFound`], [`AdssError::AmbiguousRecovery`],
/// [`AdssError::TooManyCandidates`] once more than
/// [`RecoveryOptions::max_candidates`] subsets would need to be tried, or an
/// internal error.
pub fn recover_with_options(
    shares: &[SecretShare],
    options: &RecoveryOptions,
) -> AdssResult<Recovery> {
    let access = validate_pool(shares)?;
    let threshold = usize::from(access.threshold);
    let len = shares.len();

    let candidates = candidate_count(len, threshold);
    tracing::debug!(
        pool = len,
        threshold,
        candidates = %candidates,
        parallel = options.parallel,
        "starting recovery search"
    );

    let mut search = Search::new(shares, options, candidates);
    for size in (threshold..=len).rev() {
        if search.is_complete() {
            break;
        }
        tracing::debug!(
            size,
            candidates = %binomial(len, size).unwrap_or(u128::MAX),
            "searching subsets"
        );
        let mut group = Subsets::new(len, size);
        if options.parallel {
            search.run_parallel(&mut group)?;
        } else {
            search.run_sequential(&mut group)?;
        }
    }

    search.finish(threshold)
}
