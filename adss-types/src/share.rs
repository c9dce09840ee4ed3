use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::access::AccessStructure;
use crate::constants::WIRE_FORMAT_VERSION;
use crate::error::AdssError;
use crate::primitives::{serde_b64, ShareId};

/// Public material identical across every share of one sharing operation.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct PublicData {
    /// Ciphertext of the message.
    #[serde(with = "serde_b64")]
    pub c: Vec<u8>,
    /// Ciphertext of the sharing randomness.
    #[serde(with = "serde_b64")]
    pub d: Vec<u8>,
    /// Public integrity tag: two concatenated 32-byte digests.
    #[serde(with = "serde_b64")]
    pub j: Vec<u8>,
}

/// One share produced by an ADSS sharing operation.
///
/// Shares are immutable value objects. Two shares are equal exactly when
/// their [`comparison_bytes`](SecretShare::comparison_bytes) are equal.
#[derive(Clone, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct SecretShare {
    /// Access structure the share was created under.
    pub access: AccessStructure,
    /// Share index, unique within its sharing operation.
    pub id: ShareId,
    /// Ciphertexts and integrity tag shared by all shares.
    pub public: PublicData,
    /// Base-layer share bytes, unique per share.
    #[serde(with = "serde_b64")]
    pub secret: Vec<u8>,
    /// Associated data bound into the sharing.
    #[serde(with = "serde_b64")]
    pub tag: Vec<u8>,
}

impl SecretShare {
    /// Concatenation of every field in the order
    /// `access, id, C, D, J, secret, tag`.
    ///
    /// Variable-length fields carry no length prefix, so this encoding is only
    /// suitable for equality checks and logging. Use
    /// [`to_wire_bytes`](SecretShare::to_wire_bytes) for persistence.
    pub fn comparison_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            3 + self.public.c.len()
                + self.public.d.len()
                + self.public.j.len()
                + self.secret.len()
                + self.tag.len(),
        );
        out.extend_from_slice(&self.access.to_bytes());
        out.push(self.id);
        out.extend_from_slice(&self.public.c);
        out.extend_from_slice(&self.public.d);
        out.extend_from_slice(&self.public.j);
        out.extend_from_slice(&self.secret);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Self-delimiting binary encoding: a version byte followed by borsh.
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>, AdssError> {
        let body = borsh::to_vec(self).map_err(|e| AdssError::Serialization {
            reason: e.to_string(),
        })?;
        let mut out = Vec::with_capacity(1 + body.len());
        out.push(WIRE_FORMAT_VERSION);
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Decode bytes produced by [`to_wire_bytes`](SecretShare::to_wire_bytes).
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self, AdssError> {
        let (version, body) = bytes.split_first().ok_or(AdssError::Deserialization {
            reason: "empty input".to_string(),
        })?;
        if *version != WIRE_FORMAT_VERSION {
            return Err(AdssError::Deserialization {
                reason: format!("unsupported wire format version {}", version),
            });
        }
        borsh::from_slice(body).map_err(|e| AdssError::Deserialization {
            reason: e.to_string(),
        })
    }
}

impl PartialEq for SecretShare {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_bytes() == other.comparison_bytes()
    }
}

impl Eq for SecretShare {}

impl fmt::Debug for SecretShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretShare")
            .field("access", &self.access)
            .field("id", &self.id)
            .field("public", &self.public)
            .field("secret", &format_args!("<{} bytes>", self.secret.len()))
            .field("tag", &self.tag)
            .finish()
    }
}

/// Ids of the given shares, in order.
pub fn share_ids(shares: &[SecretShare]) -> Vec<ShareId> {
    shares.iter().map(|s| s.id).collect()
}
