//! Tracing-based provider hooks.
//!
//! ```rust
//! use sobserve::TracingObservabilityHooks;
//! use sprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! accepts_provider_hooks(&TracingObservabilityHooks);
//! ```

use std::time::Duration;

use sprovider::{ProviderError, ProviderId, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_start(&self, provider: &ProviderId, operation: &str) {
        tracing::debug!(
            phase = "provider",
            event = "start",
            provider = %provider,
            operation
        );
    }

    fn on_success(&self, provider: &ProviderId, operation: &str, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "success",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_failure(
        &self,
        provider: &ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "provider",
            event = "failure",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = error.kind.as_str(),
            error = %error
        );
    }

    fn on_cancel(&self, provider: &ProviderId, operation: &str, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "cancel",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }
}
