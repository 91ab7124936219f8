use std::sync::Arc;
use std::time::Duration;

use sprovider::{ProviderError, ProviderId, ProviderOperationHooks};

/// Forwards every callback to each registered hook, in registration order.
#[derive(Clone, Default)]
pub struct FanoutProviderHooks {
    hooks: Vec<Arc<dyn ProviderOperationHooks>>,
}

impl FanoutProviderHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<H>(mut self, hooks: H) -> Self
    where
        H: ProviderOperationHooks + 'static,
    {
        self.hooks.push(Arc::new(hooks));
        self
    }

    pub fn with_arc(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for FanoutProviderHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutProviderHooks")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl ProviderOperationHooks for FanoutProviderHooks {
    fn on_start(&self, provider: &ProviderId, operation: &str) {
        for hooks in &self.hooks {
            hooks.on_start(provider, operation);
        }
    }

    fn on_success(&self, provider: &ProviderId, operation: &str, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_success(provider, operation, elapsed);
        }
    }

    fn on_failure(
        &self,
        provider: &ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        for hooks in &self.hooks {
            hooks.on_failure(provider, operation, elapsed, error);
        }
    }

    fn on_cancel(&self, provider: &ProviderId, operation: &str, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_cancel(provider, operation, elapsed);
        }
    }
}
