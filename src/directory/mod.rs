//! User directory — sign-up, log-in, and friend search.
//!
//! `UserDirectory` is the seam: the CLI only talks to the trait, and
//! `InMemoryDirectory` is the implementation used by sessions and tests.
//! Passwords are stored as Argon2id PHC strings only.

pub mod profile;

use std::collections::BTreeMap;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::kdf::Argon2Params;
use crate::crypto::password::{hash_password, verify_password};
use crate::errors::{CampusVaultError, Result};

pub use profile::{FriendQuery, Gender, Personality, UserProfile};

/// Account storage and lookup.
pub trait UserDirectory {
    /// Register a new account.  Fails with `AccountExists` on a taken
    /// username.
    fn sign_up(&mut self, profile: UserProfile, password: &str) -> Result<()>;

    /// Check credentials and return the matching profile.
    ///
    /// Unknown usernames and wrong passwords produce the same
    /// `InvalidCredentials` error.
    fn log_in(&self, username: &str, password: &str) -> Result<UserProfile>;

    /// Profiles matching `query`, sorted by username.
    fn search(&self, query: &FriendQuery) -> Vec<UserProfile>;
}

struct Account {
    profile: UserProfile,
    password_hash: String,
}

/// `UserDirectory` kept in process memory.
pub struct InMemoryDirectory {
    params: Argon2Params,
    accounts: BTreeMap<String, Account>,
    /// Hash checked when the username is unknown, so both log-in failure
    /// paths run Argon2.
    dummy_hash: Zeroizing<String>,
}

impl InMemoryDirectory {
    pub fn new(params: Argon2Params) -> Result<Self> {
        let dummy_hash = Zeroizing::new(hash_password(b"campusvault-dummy", &params)?);
        Ok(Self {
            params,
            accounts: BTreeMap::new(),
            dummy_hash,
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl UserDirectory for InMemoryDirectory {
    fn sign_up(&mut self, profile: UserProfile, password: &str) -> Result<()> {
        let username = profile.username.trim().to_string();
        if username.is_empty() {
            return Err(CampusVaultError::EmptyInput("Username is required.".into()));
        }
        if password.is_empty() {
            return Err(CampusVaultError::EmptyInput("Password is required.".into()));
        }
        if self.accounts.contains_key(&username) {
            return Err(CampusVaultError::AccountExists(username));
        }

        let password_hash = hash_password(password.as_bytes(), &self.params)?;
        let profile = UserProfile {
            username: username.clone(),
            ..profile
        };
        self.accounts.insert(
            username.clone(),
            Account {
                profile,
                password_hash,
            },
        );
        debug!(%username, "account created");
        Ok(())
    }

    fn log_in(&self, username: &str, password: &str) -> Result<UserProfile> {
        let username = username.trim();
        match self.accounts.get(username) {
            Some(account) if verify_password(password.as_bytes(), &account.password_hash) => {
                debug!(%username, "log-in succeeded");
                Ok(account.profile.clone())
            }
            Some(_) => {
                warn!(%username, "log-in rejected");
                Err(CampusVaultError::InvalidCredentials)
            }
            None => {
                let _ = verify_password(password.as_bytes(), &self.dummy_hash);
                warn!(%username, "log-in rejected");
                Err(CampusVaultError::InvalidCredentials)
            }
        }
    }

    fn search(&self, query: &FriendQuery) -> Vec<UserProfile> {
        // BTreeMap iteration is already ordered by username.
        self.accounts
            .values()
            .map(|a| &a.profile)
            .filter(|p| query.matches(p))
            .cloned()
            .collect()
    }
}
