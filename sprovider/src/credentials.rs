//! Provider credentials injected once at startup.
//!
//! The store is immutable after construction. A provider whose key is absent
//! is still constructed; its calls fail with an authentication error.
//!
//! ```rust
//! use sprovider::{CredentialStore, ProviderId};
//!
//! let store = CredentialStore::new().with_api_key("gemini", "AIza-example");
//! assert!(store.has_api_key(&ProviderId::new("gemini")));
//! assert!(!store.has_api_key(&ProviderId::new("groq")));
//! ```

use std::collections::HashMap;

use crate::{ProviderError, ProviderId};

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes are valid UTF-8.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    api_keys: HashMap<ProviderId, SecretString>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank keys are ignored so they can never stand in for a real credential.
    pub fn with_api_key(mut self, provider: impl Into<ProviderId>, api_key: impl Into<String>) -> Self {
        let secret = SecretString::new(api_key);
        if !secret.is_blank() {
            self.api_keys.insert(provider.into(), secret);
        }
        self
    }

    pub fn has_api_key(&self, provider: &ProviderId) -> bool {
        self.api_keys.contains_key(provider)
    }

    pub fn api_key(&self, provider: &ProviderId) -> Option<&SecretString> {
        self.api_keys.get(provider)
    }

    pub fn require_api_key(&self, provider: &ProviderId) -> Result<&SecretString, ProviderError> {
        self.api_key(provider).ok_or_else(|| {
            ProviderError::authentication(format!("no API key configured for provider '{provider}'"))
        })
    }
}
