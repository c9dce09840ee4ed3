use thiserror::Error;

/// Result alias used throughout the ADSS crates.
pub type AdssResult<T> = Result<T, AdssError>;

/// All error conditions surfaced by sharing and recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdssError {
    // ─── Parameter Errors ────────────────────────────────────────────────────
    #[error("invalid access structure: threshold {threshold}, count {count} (need 1 < t <= n)")]
    InvalidAccessStructure { threshold: u8, count: u8 },

    #[error("invalid key length: expected 32 bytes, got {length}")]
    InvalidKey { length: usize },

    #[error("random source failed: {reason}")]
    RandomSource { reason: String },

    #[error("coefficient stream error: {reason}")]
    CoefficientStream { reason: String },

    // ─── Pool Validation Errors ──────────────────────────────────────────────
    #[error("no shares provided")]
    NoSharesProvided,

    #[error("shares have inconsistent access structures")]
    InconsistentAccessStructure,

    #[error("shares have inconsistent tags")]
    InconsistentTag,

    #[error("duplicate share id found: {0}")]
    DuplicateId(u8),

    #[error("malformed share: {reason}")]
    MalformedShare { reason: String },

    // ─── Recovery Errors ─────────────────────────────────────────────────────
    #[error("not enough shares provided, got: {provided}, need: {required}")]
    InsufficientShares { provided: usize, required: usize },

    #[error("checksum failed")]
    ChecksumFailure,

    #[error("not a subset of resharing")]
    NotAReshare,

    #[error("no explanation found: {0}")]
    NoExplanationFound(Box<AdssError>),

    #[error("multiple explanations: {} and {}", format_ids(.second), format_ids(.first))]
    AmbiguousRecovery { first: Vec<u8>, second: Vec<u8> },

    #[error("too many candidate subsets: {candidates} exceeds limit {max}")]
    TooManyCandidates { candidates: u128, max: u64 },

    // ─── Serialization Errors ────────────────────────────────────────────────
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    #[error("deserialization error: {reason}")]
    Deserialization { reason: String },

    // ─── Internal Errors ─────────────────────────────────────────────────────
    #[error("internal invariant violated: {reason}")]
    Internal { reason: String },
}

impl AdssError {
    /// Whether this error marks a bug in the library rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, AdssError::Internal { .. })
    }
}

/// Render share ids as `{id:0, id:1}`.
pub fn format_ids(ids: &[u8]) -> String {
    let inner: Vec<String> = ids.iter().map(|id| format!("id:{}", id)).collect();
    format!("{{{}}}", inner.join(", "))
}
