//! Vault module — the passphrase-sealed message slot.
//!
//! This module provides:
//! - `CiphertextBlob`, the sealed message and its byte layout (`blob`)
//! - `MessageVault`, the single-slot store with encrypt/decrypt (`store`)

pub mod blob;
pub mod store;

pub use blob::CiphertextBlob;
pub use store::MessageVault;
