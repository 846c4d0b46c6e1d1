//! Device title-id decryption.
//!
//! Media file names and the remote catalog both carry per-game ids encrypted
//! with the console's obfuscation scheme: the 8-byte device id is
//! byte-reversed, zero-padded to a full AES block, and encrypted with
//! AES-128 in ECB mode (a single block, so no chaining or IV is involved).
//! The 16-byte ciphertext rendered as uppercase hex is the canonical id the
//! catalog keys on. The reversal-then-pad layout is part of the external
//! format and must be reproduced bit for bit.

use aes::Aes128;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use thiserror::Error;

use crate::keys::SecretKey;

/// Hex length of a raw (device-local) title id.
pub const RAW_TITLE_ID_LEN: usize = 16;

/// Hex length of a canonical (decrypted) title id.
pub const CANONICAL_TITLE_ID_LEN: usize = 32;

/// Errors for title ids that cannot be transformed.
///
/// Callers skip the offending id; these are never fatal to a batch.
#[derive(Debug, Error)]
pub enum TitleIdError {
    #[error("title id {0:?} is not valid hex")]
    InvalidHex(String),

    #[error("title id must be {RAW_TITLE_ID_LEN} hex characters, got {0}")]
    WrongLength(usize),
}

/// Transform a raw device title id into its canonical 32-character form.
pub fn decrypt_title_id(key: &SecretKey, raw: &str) -> Result<String, TitleIdError> {
    if raw.len() != RAW_TITLE_ID_LEN {
        return Err(TitleIdError::WrongLength(raw.len()));
    }
    let bytes = hex::decode(raw).map_err(|_| TitleIdError::InvalidHex(raw.to_string()))?;

    let mut block = GenericArray::from(arrange_block(&bytes));
    let cipher = Aes128::new(GenericArray::from_slice(key.as_bytes()));
    cipher.encrypt_block(&mut block);

    Ok(hex::encode_upper(block.as_slice()))
}

/// Reverse the 8 device-id bytes and right-pad with zeros to one AES block.
fn arrange_block(bytes: &[u8]) -> [u8; 16] {
    let mut block = [0u8; 16];
    for (dst, src) in block.iter_mut().zip(bytes.iter().rev()) {
        *dst = *src;
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> SecretKey {
        SecretKey::from_bytes(*b"0123456789abcdef")
    }

    #[test]
    fn test_arrange_block() {
        let block = arrange_block(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
        assert_eq!(
            block,
            [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn decryption_is_deterministic() {
        let key = test_key();
        let a = decrypt_title_id(&key, "0102030405060708").unwrap();
        let b = decrypt_title_id(&key, "0102030405060708").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn canonical_ids_are_uppercase_hex() {
        let canonical = decrypt_title_id(&test_key(), "ABCDEF0102030405").unwrap();
        assert_eq!(canonical.len(), CANONICAL_TITLE_ID_LEN);
        assert!(
            canonical
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase())
        );
    }

    #[test]
    fn distinct_ids_map_to_distinct_canonicals() {
        let key = test_key();
        let a = decrypt_title_id(&key, "0000000000000001").unwrap();
        let b = decrypt_title_id(&key, "0000000000000002").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn hex_case_does_not_change_the_result() {
        let key = test_key();
        let upper = decrypt_title_id(&key, "ABCDEF0102030405").unwrap();
        let lower = decrypt_title_id(&key, "abcdef0102030405").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let key = test_key();
        assert!(matches!(
            decrypt_title_id(&key, "0102030405"),
            Err(TitleIdError::WrongLength(10))
        ));
        assert!(matches!(
            decrypt_title_id(&key, "010203040506070809"),
            Err(TitleIdError::WrongLength(18))
        ));
        assert!(matches!(
            decrypt_title_id(&key, ""),
            Err(TitleIdError::WrongLength(0))
        ));
    }

    #[test]
    fn non_hex_is_rejected() {
        assert!(matches!(
            decrypt_title_id(&test_key(), "ghijklmnopqrstuv"),
            Err(TitleIdError::InvalidHex(_))
        ));
    }
}
