//! Integration tests for the CampusVault crypto module.

use campusvault::crypto::{
    decrypt, derive_passphrase_key, encrypt, generate_salt, hash_password, verify_password,
    Argon2Params,
};
use campusvault::errors::CampusVaultError;

fn params() -> Argon2Params {
    Argon2Params::minimum()
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"meet me at the library";

    let ciphertext = encrypt(&key, plaintext).expect("encrypt should succeed");

    // 12-byte nonce + 16-byte tag on top of the message.
    assert_eq!(ciphertext.len(), plaintext.len() + 28);

    let recovered = decrypt(&key, &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let ct1 = encrypt(&key, b"same").expect("encrypt 1");
    let ct2 = encrypt(&key, b"same").expect("encrypt 2");
    assert_ne!(ct1, ct2, "fresh nonce per call");
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let ciphertext = encrypt(&[0x11u8; 32], b"hello").expect("encrypt");
    let result = decrypt(&[0x22u8; 32], &ciphertext);
    assert!(matches!(result, Err(CampusVaultError::WrongKeyOrCorrupt)));
}

#[test]
fn decrypt_with_corrupted_ciphertext_fails() {
    let key = [0xBBu8; 32];
    let mut ciphertext = encrypt(&key, b"VALUE=abc").expect("encrypt");
    ciphertext[15] ^= 0xFF;

    let result = decrypt(&key, &ciphertext);
    assert!(matches!(result, Err(CampusVaultError::WrongKeyOrCorrupt)));
}

#[test]
fn decrypt_with_truncated_data_fails() {
    let result = decrypt(&[0xAAu8; 32], &[0u8; 5]);
    assert!(matches!(result, Err(CampusVaultError::WrongKeyOrCorrupt)));
}

// ---------------------------------------------------------------------------
// Passphrase key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_same_inputs_same_key() {
    let salt = generate_salt();
    let k1 = derive_passphrase_key(b"secret123", &salt, &params()).expect("derive 1");
    let k2 = derive_passphrase_key(b"secret123", &salt, &params()).expect("derive 2");
    assert_eq!(k1.as_bytes(), k2.as_bytes());
}

#[test]
fn derive_different_salts_different_keys() {
    let k1 = derive_passphrase_key(b"secret123", &generate_salt(), &params()).expect("derive 1");
    let k2 = derive_passphrase_key(b"secret123", &generate_salt(), &params()).expect("derive 2");
    assert_ne!(k1.as_bytes(), k2.as_bytes());
}

#[test]
fn derive_different_passphrases_different_keys() {
    let salt = generate_salt();
    let k1 = derive_passphrase_key(b"secret123", &salt, &params()).expect("derive 1");
    let k2 = derive_passphrase_key(b"wrongpass", &salt, &params()).expect("derive 2");
    assert_ne!(k1.as_bytes(), k2.as_bytes());
}

#[test]
fn derived_key_is_not_the_raw_passphrase() {
    let passphrase = [0x41u8; 32];
    let key = derive_passphrase_key(&passphrase, &generate_salt(), &params()).expect("derive");
    assert_ne!(key.as_bytes(), &passphrase);
}

#[test]
fn derive_rejects_weak_params() {
    let weak = Argon2Params {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    };
    let result = derive_passphrase_key(b"pw", &generate_salt(), &weak);
    assert!(matches!(
        result,
        Err(CampusVaultError::KeyDerivationFailed(_))
    ));
}

// ---------------------------------------------------------------------------
// End-to-end: passphrase -> key -> encrypt/decrypt
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let salt = generate_salt();
    let key = derive_passphrase_key(b"hunter2", &salt, &params()).expect("derive");

    let ciphertext = encrypt(key.as_bytes(), b"see you at 5").expect("encrypt");
    let again = derive_passphrase_key(b"hunter2", &salt, &params()).expect("derive again");
    let recovered = decrypt(again.as_bytes(), &ciphertext).expect("decrypt");
    assert_eq!(recovered, b"see you at 5");
}

#[test]
fn account_password_hashing() {
    let hash = hash_password(b"campus-pass", &params()).expect("hash");
    assert!(!hash.contains("campus-pass"));
    assert!(verify_password(b"campus-pass", &hash));
    assert!(!verify_password(b"campus-pas", &hash));
}
