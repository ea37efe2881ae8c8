//! The sealed-message blob and its byte layout.
//!
//! ```text
//! [version: 1 byte][salt: 32 bytes][nonce: 12 bytes][ciphertext + 16-byte tag]
//! ```
//!
//! Nothing in the blob identifies the passphrase that sealed it.  The
//! salt only makes the derived key unique per message.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::crypto::encryption::{NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::SALT_LEN;
use crate::errors::{CampusVaultError, Result};

/// Current blob format version.
pub const BLOB_VERSION: u8 = 1;

/// Smallest well-formed blob: version + salt + nonce + tag (empty message).
pub const MIN_BLOB_LEN: usize = 1 + SALT_LEN + NONCE_LEN + TAG_LEN;

/// An opaque, passphrase-sealed message.
#[derive(Clone, PartialEq, Eq)]
pub struct CiphertextBlob {
    bytes: Vec<u8>,
}

impl CiphertextBlob {
    /// Assemble a blob from a salt and the `nonce || ciphertext` output of
    /// `crypto::encrypt`.
    pub(crate) fn seal(salt: &[u8; SALT_LEN], sealed: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(1 + SALT_LEN + sealed.len());
        bytes.push(BLOB_VERSION);
        bytes.extend_from_slice(salt);
        bytes.extend_from_slice(sealed);
        Self { bytes }
    }

    /// Wrap raw bytes received from elsewhere.  Not validated here: a
    /// malformed blob simply fails to decrypt.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Parse the base64 text form produced by `to_base64`.
    pub fn from_base64(text: &str) -> Result<Self> {
        BASE64
            .decode(text.trim())
            .map(Self::from_bytes)
            .map_err(|e| CampusVaultError::InvalidBlob(format!("base64: {e}")))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    /// Short public identifier: hex of the first 8 bytes of SHA-256 over
    /// the whole blob.
    pub fn fingerprint(&self) -> String {
        Sha256::digest(&self.bytes)
            .iter()
            .take(8)
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    /// Split into `(salt, nonce || ciphertext)`.
    ///
    /// Structural problems are reported as `WrongKeyOrCorrupt` so a
    /// caller cannot tell a truncated blob from a wrong passphrase.
    pub(crate) fn parts(&self) -> Result<(&[u8], &[u8])> {
        if self.bytes.len() < MIN_BLOB_LEN || self.bytes[0] != BLOB_VERSION {
            return Err(CampusVaultError::WrongKeyOrCorrupt);
        }
        Ok(self.bytes[1..].split_at(SALT_LEN))
    }
}

impl fmt::Debug for CiphertextBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CiphertextBlob")
            .field("len", &self.bytes.len())
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CiphertextBlob {
        CiphertextBlob::seal(&[7u8; SALT_LEN], &[9u8; NONCE_LEN + TAG_LEN + 4])
    }

    #[test]
    fn seal_lays_out_version_salt_payload() {
        let blob = sample();
        assert_eq!(blob.as_bytes()[0], BLOB_VERSION);
        assert_eq!(&blob.as_bytes()[1..=SALT_LEN], &[7u8; SALT_LEN]);
        assert_eq!(blob.len(), MIN_BLOB_LEN + 4);

        let (salt, payload) = blob.parts().unwrap();
        assert_eq!(salt, &[7u8; SALT_LEN]);
        assert_eq!(payload.len(), NONCE_LEN + TAG_LEN + 4);
    }

    #[test]
    fn short_or_unknown_version_blobs_are_corrupt() {
        let short = CiphertextBlob::from_bytes(vec![BLOB_VERSION; MIN_BLOB_LEN - 1]);
        assert!(matches!(
            short.parts(),
            Err(CampusVaultError::WrongKeyOrCorrupt)
        ));

        let mut bytes = sample().as_bytes().to_vec();
        bytes[0] = 0x7f;
        let future = CiphertextBlob::from_bytes(bytes);
        assert!(matches!(
            future.parts(),
            Err(CampusVaultError::WrongKeyOrCorrupt)
        ));
    }

    #[test]
    fn base64_text_form_parses_back() {
        let blob = sample();
        let text = blob.to_base64();
        assert_eq!(CiphertextBlob::from_base64(&text).unwrap(), blob);
        assert!(CiphertextBlob::from_base64("not base64 !!").is_err());
    }

    #[test]
    fn fingerprint_is_sixteen_hex_chars() {
        let fp = sample().fingerprint();
        assert_eq!(fp.len(), 16);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn debug_output_hides_bytes() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("fingerprint"));
        assert!(!rendered.contains("[9, 9"));
    }
}
