//! `MessageVault` — the single-slot secret message store.
//!
//! The vault holds at most one sealed message.  `encrypt` replaces it,
//! `decrypt` reads it without modifying it.  The slot lives only in
//! memory and is gone when the owning value is dropped.

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::kdf::{derive_passphrase_key, generate_salt, Argon2Params};
use crate::errors::{CampusVaultError, Result};

use super::blob::CiphertextBlob;

/// In-memory holder of at most one `CiphertextBlob`.
///
/// Create one per request-handling context (a `Session`, a test, ...);
/// there is no global instance.
#[derive(Debug)]
pub struct MessageVault {
    /// KDF parameters used for every seal/open.
    params: Argon2Params,

    /// The slot.  `None` until the first successful `encrypt`.
    slot: Option<CiphertextBlob>,
}

impl Default for MessageVault {
    fn default() -> Self {
        Self {
            params: Argon2Params::default(),
            slot: None,
        }
    }
}

impl MessageVault {
    /// Create an empty vault with explicit Argon2id parameters.
    ///
    /// Parameters are validated up front so later key derivations cannot
    /// fail on configuration.
    pub fn new(params: Argon2Params) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, slot: None })
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    /// Seal `plaintext` under `passphrase` and store it, discarding any
    /// previously stored message.
    ///
    /// Callers are expected to reject empty inputs before calling.  On
    /// error the slot is left as it was.
    pub fn encrypt(&mut self, plaintext: &str, passphrase: &str) -> Result<CiphertextBlob> {
        let salt = generate_salt();
        let key = derive_passphrase_key(passphrase.as_bytes(), &salt, &self.params)?;
        let sealed = encrypt(key.as_bytes(), plaintext.as_bytes())?;

        let blob = CiphertextBlob::seal(&salt, &sealed);
        let replaced = self.slot.replace(blob.clone()).is_some();
        debug!(
            fingerprint = %blob.fingerprint(),
            replaced,
            "sealed message stored"
        );
        Ok(blob)
    }

    /// Try to recover the stored message with `passphrase`.
    ///
    /// Returns `NoMessageStored` when the slot is empty and
    /// `WrongKeyOrCorrupt` for every other failure.
    pub fn decrypt(&self, passphrase: &str) -> Result<Zeroizing<String>> {
        let blob = self.slot.as_ref().ok_or(CampusVaultError::NoMessageStored)?;

        let result = open_blob(blob, passphrase, &self.params);
        if result.is_err() {
            warn!(fingerprint = %blob.fingerprint(), "failed to open sealed message");
        }
        result
    }

    pub fn has_message(&self) -> bool {
        self.slot.is_some()
    }

    /// Borrow the stored blob, if any.
    pub fn stored(&self) -> Option<&CiphertextBlob> {
        self.slot.as_ref()
    }

    /// Install a blob received from elsewhere (e.g. pasted as base64),
    /// returning the one it replaced.
    pub fn replace_stored(&mut self, blob: CiphertextBlob) -> Option<CiphertextBlob> {
        self.slot.replace(blob)
    }

    /// Empty the slot.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

/// Derive the key from the blob's salt and authenticate-decrypt it.
fn open_blob(
    blob: &CiphertextBlob,
    passphrase: &str,
    params: &Argon2Params,
) -> Result<Zeroizing<String>> {
    let (salt, sealed) = blob.parts()?;
    let key = derive_passphrase_key(passphrase.as_bytes(), salt, params)
        .map_err(|_| CampusVaultError::WrongKeyOrCorrupt)?;

    let plaintext = Zeroizing::new(decrypt(key.as_bytes(), sealed)?);
    let text = std::str::from_utf8(&plaintext).map_err(|_| CampusVaultError::WrongKeyOrCorrupt)?;
    Ok(Zeroizing::new(text.to_owned()))
}
