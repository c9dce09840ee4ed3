use adss_types::constants::KEY_LEN;
use adss_types::error::{AdssError, AdssResult};
use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};

/// AES-256 in counter mode with a full 128-bit big-endian counter.
type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Initial counter block for the first stream (the message).
const FIRST_STREAM_IV: [u8; 16] = [0u8; 16];

/// Initial counter block for the second stream (the sharing randomness).
const SECOND_STREAM_IV: [u8; 16] = [1u8; 16];

/// XOR `data` with the AES-256-CTR keystream starting at `iv`.
fn xor_keystream(key: &[u8], iv: &[u8; 16], data: &[u8]) -> AdssResult<Vec<u8>> {
    let mut cipher = Aes256Ctr::new_from_slices(key, iv).map_err(|_| AdssError::InvalidKey {
        length: key.len(),
    })?;
    let mut out = data.to_vec();
    cipher.apply_keystream(&mut out);
    Ok(out)
}

/// Encrypt two plaintexts under one key using two independent keystreams.
///
/// The streams differ only in their initial counter block, so the same key
/// may safely cover both inputs. Applying the function to the ciphertexts
/// decrypts them.
///
/// # Errors
/// Returns [`AdssError::InvalidKey`] unless `key` is exactly 32 bytes.
pub fn encrypt_two(key: &[u8], first: &[u8], second: &[u8]) -> AdssResult<(Vec<u8>, Vec<u8>)> {
    if key.len() != KEY_LEN {
        return Err(AdssError::InvalidKey { length: key.len() });
    }
    let c1 = xor_keystream(key, &FIRST_STREAM_IV, first)?;
    let c2 = xor_keystream(key, &SECOND_STREAM_IV, second)?;
    Ok((c1, c2))
}

/// Inverse of [`encrypt_two`].
pub fn decrypt_two(key: &[u8], first: &[u8], second: &[u8]) -> AdssResult<(Vec<u8>, Vec<u8>)> {
    encrypt_two(key, first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Vec<u8> {
        (0u8..32).collect()
    }

    #[test]
    fn test_nist_ctr_vector() {
        // SP 800-38A F.5.5, CTR-AES256.Encrypt, first block.
        let key = [
            0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d,
            0x77, 0x81, 0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3,
            0x09, 0x14, 0xdf, 0xf4,
        ];
        let iv = [
            0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd,
            0xfe, 0xff,
        ];
        let plaintext = [
            0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93,
            0x17, 0x2a,
        ];
        let ciphertext = xor_keystream(&key, &iv, &plaintext).unwrap();
        assert_eq!(hex::encode(ciphertext), "601ec313775789a5b7a7f504bbf3d228");
    }

    #[test]
    fn test_domain_separated_keystreams() {
        // Keystreams over 20 zero bytes, crossing a counter block boundary.
        let (c1, c2) = encrypt_two(&key(), &[0u8; 20], &[0u8; 20]).unwrap();
        assert_eq!(hex::encode(c1), "f29000b62a499fd0a9f39a6add2e7780f05d76ae");
        assert_eq!(hex::encode(c2), "75e20829172112bbf2a04d3d2b12433d8678c4ef");
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let message = b"hello, adept secret sharing";
        let randomness = [7u8; 32];
        let (c, d) = encrypt_two(&key(), message, &randomness).unwrap();
        assert_ne!(c.as_slice(), message);
        let (m, r) = decrypt_two(&key(), &c, &d).unwrap();
        assert_eq!(m, message);
        assert_eq!(r, randomness);
    }

    #[test]
    fn test_empty_inputs() {
        let (c, d) = encrypt_two(&key(), &[], &[]).unwrap();
        assert!(c.is_empty());
        assert!(d.is_empty());
    }

    #[test]
    fn test_wrong_key_length_rejected() {
        assert_eq!(
            encrypt_two(&[0u8; 16], b"a", b"b"),
            Err(AdssError::InvalidKey { length: 16 })
        );
        assert_eq!(
            encrypt_two(&[], b"a", b"b"),
            Err(AdssError::InvalidKey { length: 0 })
        );
    }
}
