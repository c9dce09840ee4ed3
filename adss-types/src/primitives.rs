/// Index of a share within one sharing operation, in `[0, n)`.
pub type ShareId = u8;

/// 32-byte SHA-256 digest.
pub type Digest = [u8; 32];

/// Serde helper that renders byte vectors as standard base64 strings.
pub mod serde_b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD
            .decode(s.as_bytes())
            .map_err(|e| serde::de::Error::custom(format!("invalid base64: {}", e)))
    }
}
