//! Operational hook contract for provider calls.
//!
//! Hooks observe; they never alter the outcome of a call and there is no
//! retry loop behind them.

use std::time::Duration;

use crate::{ProviderError, ProviderId};

pub const OPERATION_COMPLETE: &str = "complete";
pub const OPERATION_STREAM: &str = "stream";

pub trait ProviderOperationHooks: Send + Sync {
    fn on_start(&self, _provider: &ProviderId, _operation: &str) {}

    fn on_success(&self, _provider: &ProviderId, _operation: &str, _elapsed: Duration) {}

    fn on_failure(
        &self,
        _provider: &ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }

    /// The caller dropped the operation before it reached success or failure.
    fn on_cancel(&self, _provider: &ProviderId, _operation: &str, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}
