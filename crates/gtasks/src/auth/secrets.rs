//! Refresh-token persistence.
//!
//! The refresh token is the only piece of state that outlives a process, so
//! storage is given an explicit seam: [`SecretStore`] abstracts keyed
//! lookup/write of a token under an account identifier, [`KeyringStore`]
//! backs it with the OS keychain, and [`MemoryStore`] exists for tests and
//! embedding without a keychain.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::SecretError;

use super::tokens::RefreshToken;

/// Keychain service namespace for stored refresh tokens.
const KEYCHAIN_SERVICE: &str = "gtasks";

/// Keyed persistence of refresh tokens.
///
/// Implementations store one refresh token per account identifier. Tokens
/// are written on successful interactive authorization and read on startup.
pub trait SecretStore {
    /// Look up the stored refresh token for an account.
    fn get(&self, account: &str) -> Result<Option<RefreshToken>, SecretError>;

    /// Store a refresh token for an account, replacing any previous one.
    fn put(&self, account: &str, token: &RefreshToken) -> Result<(), SecretError>;

    /// Delete the stored refresh token for an account.
    ///
    /// Deleting a token that does not exist is not an error.
    fn delete(&self, account: &str) -> Result<(), SecretError>;
}

/// Refresh-token storage in the OS keychain.
///
/// - macOS: Keychain
/// - Windows: Credential Manager
/// - Linux: Secret Service (libsecret)
///
/// Tokens are stored under the `gtasks` service with the account identifier
/// as the username.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Create a keyring store using the default service namespace.
    pub fn new() -> Self {
        Self {
            service: KEYCHAIN_SERVICE.to_string(),
        }
    }

    fn entry(&self, account: &str) -> Result<keyring::Entry, SecretError> {
        Ok(keyring::Entry::new(&self.service, account)?)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for KeyringStore {
    fn get(&self, account: &str) -> Result<Option<RefreshToken>, SecretError> {
        match self.entry(account)?.get_password() {
            Ok(token) => Ok(Some(RefreshToken::new(token))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SecretError::Keyring(e)),
        }
    }

    fn put(&self, account: &str, token: &RefreshToken) -> Result<(), SecretError> {
        self.entry(account)?.set_password(token.as_str())?;
        Ok(())
    }

    fn delete(&self, account: &str) -> Result<(), SecretError> {
        match self.entry(account)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretError::Keyring(e)),
        }
    }
}

/// In-memory refresh-token storage.
///
/// Useful for tests and for embedding the library where an OS keychain is
/// unavailable. Contents are lost when the store is dropped.
#[derive(Default)]
pub struct MemoryStore {
    tokens: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemoryStore {
    fn get(&self, account: &str) -> Result<Option<RefreshToken>, SecretError> {
        let tokens = self.tokens.lock().expect("store mutex poisoned");
        Ok(tokens.get(account).map(RefreshToken::new))
    }

    fn put(&self, account: &str, token: &RefreshToken) -> Result<(), SecretError> {
        let mut tokens = self.tokens.lock().expect("store mutex poisoned");
        tokens.insert(account.to_string(), token.as_str().to_string());
        Ok(())
    }

    fn delete(&self, account: &str) -> Result<(), SecretError> {
        let mut tokens = self.tokens.lock().expect("store mutex poisoned");
        tokens.remove(account);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("alice").unwrap().is_none());

        store
            .put("alice", &RefreshToken::new("token-1"))
            .unwrap();
        assert_eq!(store.get("alice").unwrap().unwrap().as_str(), "token-1");

        // Replaced wholesale on re-authorization
        store
            .put("alice", &RefreshToken::new("token-2"))
            .unwrap();
        assert_eq!(store.get("alice").unwrap().unwrap().as_str(), "token-2");

        store.delete("alice").unwrap();
        assert!(store.get("alice").unwrap().is_none());
    }

    #[test]
    fn memory_store_delete_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("nobody").is_ok());
    }

    #[test]
    fn memory_store_keys_accounts_independently() {
        let store = MemoryStore::new();
        store.put("alice", &RefreshToken::new("a")).unwrap();
        store.put("bob", &RefreshToken::new("b")).unwrap();

        assert_eq!(store.get("alice").unwrap().unwrap().as_str(), "a");
        assert_eq!(store.get("bob").unwrap().unwrap().as_str(), "b");
    }
}
