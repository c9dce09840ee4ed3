use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::MIN_THRESHOLD;
use crate::error::AdssError;
use crate::primitives::ShareId;

/// A `(t, n)` threshold policy: any `t` of `n` shares reconstruct the secret.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct AccessStructure {
    /// Minimum number of shares required for recovery (`t`).
    pub threshold: u8,
    /// Total number of shares produced (`n`).
    pub count: u8,
}

impl AccessStructure {
    /// Build an access structure without validating it.
    ///
    /// Use [`AccessStructure::validate`] or [`AccessStructure::try_new`] when
    /// the parameters come from an untrusted source.
    pub const fn new(threshold: u8, count: u8) -> Self {
        Self { threshold, count }
    }

    /// Build an access structure, rejecting anything outside `1 < t <= n`.
    pub fn try_new(threshold: u8, count: u8) -> Result<Self, AdssError> {
        let access = Self::new(threshold, count);
        access.validate()?;
        Ok(access)
    }

    /// Check the `1 < t <= n <= 255` invariant.
    pub fn validate(&self) -> Result<(), AdssError> {
        if self.threshold < MIN_THRESHOLD || self.threshold > self.count {
            return Err(AdssError::InvalidAccessStructure {
                threshold: self.threshold,
                count: self.count,
            });
        }
        Ok(())
    }

    /// The two-byte encoding `t || n` used as hash input.
    pub fn to_bytes(&self) -> [u8; 2] {
        [self.threshold, self.count]
    }

    /// Whether this combination of share ids is authorised to recover.
    ///
    /// Plain thresholds place no constraint beyond the subset size, so every
    /// id set is accepted. Richer access structures would restrict this.
    pub fn supports_ids(&self, _ids: &[ShareId]) -> bool {
        true
    }
}
