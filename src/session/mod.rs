//! Session — the presentation-side state behind the interactive menu.
//!
//! A `Session` owns one message vault, one user directory, and the
//! logged-in user.  It validates form input before touching the vault
//! and turns typed vault results into the strings the user sees.

use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::directory::{FriendQuery, InMemoryDirectory, UserDirectory, UserProfile};
use crate::errors::{CampusVaultError, Result};
use crate::vault::{CiphertextBlob, MessageVault};

#[cfg(feature = "audit-log")]
use crate::audit::AuditLog;

/// Shown when the send form is submitted with a blank field.
pub const MISSING_INPUT: &str = "Both message and encryption key are required.";

/// Shown when "View message" is used before anything was sent.
pub const NO_MESSAGE: &str = "No message to view yet.";

/// Shown for every failed decryption, whatever the cause.
pub const OPEN_FAILED: &str = "Could not decrypt the message — wrong key or corrupted data.";

pub struct Session<D: UserDirectory = InMemoryDirectory> {
    vault: MessageVault,
    directory: D,
    current_user: Option<UserProfile>,
    min_password_len: usize,
    #[cfg(feature = "audit-log")]
    audit: Option<AuditLog>,
}

impl Session<InMemoryDirectory> {
    /// Build a session from loaded settings, opening the audit log under
    /// `<cwd>/<data_dir>` when the feature is enabled.
    pub fn from_settings(settings: &Settings, cwd: &Path) -> Result<Self> {
        let params = settings.argon2_params();
        let vault = MessageVault::new(params)?;
        let directory = InMemoryDirectory::new(params)?;

        let session =
            Self::new(vault, directory).with_min_password_len(settings.min_password_len);

        #[cfg(feature = "audit-log")]
        let session = {
            let data_dir = settings.data_path(cwd);
            std::fs::create_dir_all(&data_dir)?;
            match AuditLog::open(&data_dir) {
                Some(audit) => session.with_audit(audit),
                None => session,
            }
        };
        #[cfg(not(feature = "audit-log"))]
        let _ = cwd;

        Ok(session)
    }
}

impl<D: UserDirectory> Session<D> {
    pub fn new(vault: MessageVault, directory: D) -> Self {
        Self {
            vault,
            directory,
            current_user: None,
            min_password_len: 0,
            #[cfg(feature = "audit-log")]
            audit: None,
        }
    }

    /// Require account passwords of at least `len` characters at sign-up.
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    #[cfg(feature = "audit-log")]
    pub fn with_audit(mut self, audit: AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn vault(&self) -> &MessageVault {
        &self.vault
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current_user.as_ref()
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    pub fn sign_up(&mut self, profile: UserProfile, password: &str) -> Result<()> {
        if password.chars().count() < self.min_password_len {
            return Err(CampusVaultError::WeakPassword(self.min_password_len));
        }
        let username = profile.username.trim().to_string();
        self.directory.sign_up(profile, password)?;
        self.record("sign-up", Some(&username), None);
        Ok(())
    }

    pub fn log_in(&mut self, username: &str, password: &str) -> Result<&UserProfile> {
        match self.directory.log_in(username, password) {
            Ok(profile) => {
                self.record("log-in", Some(&profile.username), None);
                Ok(self.current_user.insert(profile))
            }
            Err(e) => {
                self.record("log-in-failed", None, None);
                Err(e)
            }
        }
    }

    /// Forget the logged-in user.  Returns whether anyone was logged in.
    pub fn log_out(&mut self) -> bool {
        self.current_user.take().is_some()
    }

    /// Search the directory, never returning the logged-in user.
    pub fn find_friends(&self, mut query: FriendQuery) -> Vec<UserProfile> {
        if let Some(me) = &self.current_user {
            query.exclude_username = Some(me.username.clone());
        }
        self.directory.search(&query)
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    /// Seal `message` under `passphrase`, replacing any stored message.
    ///
    /// An empty message or passphrase is rejected with `MISSING_INPUT` and
    /// nothing is sealed.  Whitespace counts as content.
    pub fn send_message(&mut self, message: &str, passphrase: &str) -> Result<CiphertextBlob> {
        if message.is_empty() || passphrase.is_empty() {
            return Err(CampusVaultError::EmptyInput(MISSING_INPUT.into()));
        }

        let blob = self.vault.encrypt(message, passphrase)?;
        let details = format!("fingerprint {}", blob.fingerprint());
        self.record("seal", None, Some(&details));
        Ok(blob)
    }

    /// Try to open the stored message and return what the user should see.
    pub fn view_message(&self, passphrase: &str) -> Zeroizing<String> {
        match self.vault.decrypt(passphrase) {
            Ok(plaintext) => {
                self.record("open", None, None);
                plaintext
            }
            Err(CampusVaultError::NoMessageStored) => Zeroizing::new(NO_MESSAGE.to_string()),
            Err(e) => {
                debug!(error = %e, "view_message failed");
                self.record("open-failed", None, None);
                Zeroizing::new(OPEN_FAILED.to_string())
            }
        }
    }

    /// Like `view_message` but keeps the typed result for callers that
    /// style success and failure differently.
    pub fn open_message(&self, passphrase: &str) -> Result<Zeroizing<String>> {
        let result = self.vault.decrypt(passphrase);
        match &result {
            Ok(_) => self.record("open", None, None),
            Err(CampusVaultError::NoMessageStored) => {}
            Err(_) => self.record("open-failed", None, None),
        }
        result
    }

    fn record(&self, operation: &str, username: Option<&str>, details: Option<&str>) {
        #[cfg(feature = "audit-log")]
        if let Some(audit) = &self.audit {
            let actor = username.or(self.current_user.as_ref().map(|u| u.username.as_str()));
            audit.log(operation, actor, details);
        }
        #[cfg(not(feature = "audit-log"))]
        let _ = (operation, username, details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Argon2Params;
    use crate::directory::Gender;

    fn session() -> Session {
        let params = Argon2Params::minimum();
        Session::new(
            MessageVault::new(params).unwrap(),
            InMemoryDirectory::new(params).unwrap(),
        )
        .with_min_password_len(8)
    }

    fn profile(username: &str) -> UserProfile {
        UserProfile {
            name: "Test User".into(),
            university: "CU".into(),
            department: "Physics".into(),
            session: "2020-21".into(),
            gender: Gender::Other,
            username: username.into(),
        }
    }

    #[test]
    fn empty_message_or_key_is_rejected_without_sealing() {
        let mut s = session();
        for (msg, key) in [("", "key"), ("hello", ""), ("", "")] {
            let err = s.send_message(msg, key).unwrap_err();
            assert_eq!(err.to_string(), MISSING_INPUT);
        }
        assert!(!s.vault().has_message());
    }

    #[test]
    fn whitespace_only_message_is_sealed() {
        let mut s = session();
        s.send_message("   ", "key").unwrap();
        assert_eq!(s.view_message("key").as_str(), "   ");
    }

    #[test]
    fn view_before_send_says_nothing_stored() {
        let s = session();
        assert_eq!(s.view_message("whatever").as_str(), NO_MESSAGE);
        assert!(matches!(
            s.open_message("whatever"),
            Err(CampusVaultError::NoMessageStored)
        ));
    }

    #[test]
    fn send_then_view() {
        let mut s = session();
        s.send_message("meet at 5pm", "secret123").unwrap();
        assert_eq!(s.view_message("secret123").as_str(), "meet at 5pm");
        assert_eq!(s.view_message("wrongpass").as_str(), OPEN_FAILED);
    }

    #[test]
    fn short_account_password_is_rejected() {
        let mut s = session();
        let err = s.sign_up(profile("kabir"), "short").unwrap_err();
        assert!(matches!(err, CampusVaultError::WeakPassword(8)));
    }

    #[test]
    fn log_in_and_out() {
        let mut s = session();
        s.sign_up(profile("kabir"), "long-enough").unwrap();
        assert!(s.current_user().is_none());

        let me = s.log_in("kabir", "long-enough").unwrap();
        assert_eq!(me.username, "kabir");
        assert!(s.current_user().is_some());

        assert!(s.log_out());
        assert!(!s.log_out());
    }

    #[test]
    fn failed_log_in_keeps_previous_user() {
        let mut s = session();
        s.sign_up(profile("kabir"), "long-enough").unwrap();
        s.log_in("kabir", "long-enough").unwrap();

        assert!(s.log_in("kabir", "not-the-password").is_err());
        assert_eq!(s.current_user().map(|u| u.username.as_str()), Some("kabir"));
    }

    #[test]
    fn find_friends_skips_the_logged_in_user() {
        let mut s = session();
        s.sign_up(profile("kabir"), "long-enough").unwrap();
        s.sign_up(profile("lima"), "long-enough").unwrap();

        assert_eq!(s.find_friends(FriendQuery::default()).len(), 2);

        s.log_in("kabir", "long-enough").unwrap();
        let found = s.find_friends(FriendQuery::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "lima");
    }

    #[cfg(feature = "audit-log")]
    #[test]
    fn audit_records_operations_without_secrets() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut s = session().with_audit(AuditLog::open(dir.path()).unwrap());

        s.send_message("meet at 5pm", "secret123").unwrap();
        let _ = s.view_message("wrongpass");

        let audit = AuditLog::open(dir.path()).unwrap();
        let entries = audit.query(10).unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation.as_str()).collect();
        assert_eq!(ops, ["open-failed", "seal"]);
        for entry in &entries {
            let details = entry.details.as_deref().unwrap_or_default();
            assert!(!details.contains("meet at 5pm"));
            assert!(!details.contains("secret123"));
        }
    }
}
