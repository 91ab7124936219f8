//! Provider registry with lenient lookup.
//!
//! Unknown or missing identifiers resolve to the designated default provider,
//! which is the first registered provider unless one is set explicitly.
//!
//! ```rust
//! use sprovider::ProviderRegistry;
//!
//! let registry = ProviderRegistry::new();
//! assert!(registry.is_empty());
//! assert!(registry.resolve(Some("gemini")).is_err());
//! ```

use std::sync::Arc;

use scommon::Registry;

use crate::{ModelProvider, ProviderError, ProviderId};

#[derive(Clone)]
pub struct ResolvedProvider {
    pub id: ProviderId,
    pub provider: Arc<dyn ModelProvider>,
    /// True when the requested identifier was absent or unknown.
    pub fell_back: bool,
}

impl std::fmt::Debug for ResolvedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedProvider")
            .field("id", &self.id)
            .field("fell_back", &self.fell_back)
            .finish()
    }
}

#[derive(Default)]
pub struct ProviderRegistry {
    providers: Registry<ProviderId, Arc<dyn ModelProvider>>,
    default: Option<ProviderId>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P>(&mut self, provider: P)
    where
        P: ModelProvider + 'static,
    {
        self.register_arc(Arc::new(provider));
    }

    pub fn register_arc(&mut self, provider: Arc<dyn ModelProvider>) {
        self.providers.insert(provider.id(), provider);
    }

    /// Designates the fallback provider. The identifier must already be registered.
    pub fn set_default(&mut self, provider_id: impl Into<ProviderId>) -> Result<(), ProviderError> {
        let provider_id = provider_id.into();
        if !self.providers.contains_key(&provider_id) {
            return Err(ProviderError::invalid_request(format!(
                "default provider '{provider_id}' is not registered"
            )));
        }

        self.default = Some(provider_id);
        Ok(())
    }

    pub fn default_id(&self) -> Option<&ProviderId> {
        self.default
            .as_ref()
            .filter(|id| self.providers.contains_key(*id))
            .or_else(|| self.providers.first_key())
    }

    pub fn get(&self, provider_id: &ProviderId) -> Option<Arc<dyn ModelProvider>> {
        self.providers.get(provider_id).cloned()
    }

    pub fn resolve(&self, identifier: Option<&str>) -> Result<ResolvedProvider, ProviderError> {
        let requested = identifier
            .map(ProviderId::new)
            .filter(|id| !id.as_str().is_empty());

        if let Some(id) = requested.as_ref() {
            if let Some(provider) = self.get(id) {
                return Ok(ResolvedProvider {
                    id: id.clone(),
                    provider,
                    fell_back: false,
                });
            }
        }

        let default_id = self
            .default_id()
            .cloned()
            .ok_or_else(|| ProviderError::unavailable("no chat providers are registered"))?;
        let provider = self
            .get(&default_id)
            .ok_or_else(|| ProviderError::unavailable("default chat provider is missing"))?;

        Ok(ResolvedProvider {
            id: default_id,
            provider,
            fell_back: true,
        })
    }

    pub fn remove(&mut self, provider_id: &ProviderId) -> Option<Arc<dyn ModelProvider>> {
        if self.default.as_ref() == Some(provider_id) {
            self.default = None;
        }
        self.providers.remove(provider_id)
    }

    pub fn contains(&self, provider_id: &ProviderId) -> bool {
        self.providers.contains_key(provider_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ProviderId> {
        self.providers.keys()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
