//! Loading and validation of the album decryption key.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Key length in bytes.
pub const KEY_LEN: usize = 16;

/// Hex length of the key as stored on disk.
pub const KEY_HEX_LEN: usize = 32;

/// Lowercase hex MD5 digest of the expected key bytes.
pub const KEY_FINGERPRINT: &str = "24e0dc62a15c11d38b622162ea2b4383";

/// Errors from reading or validating the key file.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("key file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read key file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("key file must start with at least {KEY_HEX_LEN} hex characters")]
    TooShort,

    #[error("key is not valid hex")]
    InvalidHex,

    #[error("key does not match the expected fingerprint")]
    FingerprintMismatch,
}

/// The 16-byte AES key that turns device-local title ids into canonical ones.
///
/// Never persisted by this tool; read from the key file once per remote
/// update and dropped afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Wrap raw key bytes without checking the fingerprint.
    ///
    /// The cipher accepts any key; [`SecretKey::load`] is where validation
    /// lives.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Read the key from `path` and validate it against [`KEY_FINGERPRINT`].
    ///
    /// Only the first 32 characters of the first line are read; anything
    /// after them is ignored.
    pub fn load(path: &Path) -> Result<Self, KeyError> {
        if !path.exists() {
            return Err(KeyError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|e| KeyError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let line = contents.lines().next().unwrap_or("");
        let hex_part = line.get(..KEY_HEX_LEN).ok_or(KeyError::TooShort)?;
        let bytes = hex::decode(hex_part).map_err(|_| KeyError::InvalidHex)?;
        let key = Self(bytes.try_into().map_err(|_| KeyError::InvalidHex)?);
        if !key.matches_fingerprint() {
            return Err(KeyError::FingerprintMismatch);
        }
        Ok(key)
    }

    /// Lowercase hex MD5 digest of the key bytes.
    pub fn fingerprint(&self) -> String {
        format!("{:x}", md5::compute(self.0))
    }

    pub fn matches_fingerprint(&self) -> bool {
        self.fingerprint() == KEY_FINGERPRINT
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    // Key material stays out of logs; the fingerprint is enough to identify it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(md5 {})", self.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_key_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("key.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{contents}").unwrap();
        path
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = SecretKey::load(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(KeyError::NotFound(_))));
    }

    #[test]
    fn short_file_is_too_short() {
        let dir = TempDir::new().unwrap();
        let path = write_key_file(&dir, "00112233");
        assert!(matches!(SecretKey::load(&path), Err(KeyError::TooShort)));
    }

    #[test]
    fn non_hex_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_key_file(&dir, "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz");
        assert!(matches!(SecretKey::load(&path), Err(KeyError::InvalidHex)));
    }

    #[test]
    fn wrong_key_fails_the_fingerprint() {
        let dir = TempDir::new().unwrap();
        let path = write_key_file(&dir, "000102030405060708090a0b0c0d0e0f");
        assert!(matches!(
            SecretKey::load(&path),
            Err(KeyError::FingerprintMismatch)
        ));
    }

    #[test]
    fn only_the_first_line_matters_after_validation() {
        // A wrong key with trailing lines still reaches the fingerprint
        // check rather than failing on the extra content.
        let dir = TempDir::new().unwrap();
        let path = write_key_file(&dir, "000102030405060708090a0b0c0d0e0f\nsecond line\n");
        assert!(matches!(
            SecretKey::load(&path),
            Err(KeyError::FingerprintMismatch)
        ));
    }

    #[test]
    fn fingerprint_is_stable() {
        let key = SecretKey::from_bytes([0u8; KEY_LEN]);
        assert_eq!(key.fingerprint(), key.fingerprint());
        assert!(!key.matches_fingerprint());
    }
}
