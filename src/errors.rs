use thiserror::Error;

/// All errors that can occur in CampusVault.
#[derive(Debug, Error)]
pub enum CampusVaultError {
    // --- Message vault errors ---
    #[error("No message stored — nothing to decrypt")]
    NoMessageStored,

    #[error("Decryption failed — wrong key or corrupted message")]
    WrongKeyOrCorrupt,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashFailed(String),

    #[error("Invalid message blob: {0}")]
    InvalidBlob(String),

    // --- Directory errors ---
    #[error("Account '{0}' already exists")]
    AccountExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    EmptyInput(String),

    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("Not logged in — log in or sign up first")]
    NotLoggedIn,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Prompt failed: {0}")]
    PromptFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for CampusVault results.
pub type Result<T> = std::result::Result<T, CampusVaultError>;
