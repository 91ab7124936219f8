use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use sprovider::{ProviderError, ProviderId, ProviderOperationHooks};

/// Swallows panics raised by the wrapped hooks so observers can never abort a
/// request.
#[derive(Debug, Clone, Default)]
pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_start(&self, provider: &ProviderId, operation: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_start(provider, operation)));
    }

    fn on_success(&self, provider: &ProviderId, operation: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(provider, operation, elapsed)
        }));
    }

    fn on_failure(
        &self,
        provider: &ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(provider, operation, elapsed, error)
        }));
    }

    fn on_cancel(&self, provider: &ProviderId, operation: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_cancel(provider, operation, elapsed)
        }));
    }
}
