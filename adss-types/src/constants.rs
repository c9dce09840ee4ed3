// ─── Sharing Parameters ──────────────────────────────────────────────────────

/// Smallest threshold an access structure may carry.
pub const MIN_THRESHOLD: u8 = 2;

/// Number of random bytes drawn per sharing operation.
pub const RANDOMNESS_LEN: usize = 32;

/// Length of the encryption key `K` (AES-256).
pub const KEY_LEN: usize = 32;

/// Length of a single SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// Length of the public integrity tag `J` (two concatenated digests).
pub const TAG_J_LEN: usize = 2 * DIGEST_LEN;

// ─── Recovery Parameters ─────────────────────────────────────────────────────

/// Default cap on the number of candidate subsets the error-correcting
/// recovery will try before giving up.
pub const DEFAULT_MAX_CANDIDATES: u64 = 1 << 20;

// ─── Wire Format ─────────────────────────────────────────────────────────────

/// Version byte prefixed to the binary share encoding.
pub const WIRE_FORMAT_VERSION: u8 = 1;
