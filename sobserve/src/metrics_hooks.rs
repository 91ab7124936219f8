//! Metrics-based provider hooks. Nothing is exported unless the host
//! installs a `metrics` recorder.

use std::time::Duration;

use sprovider::{ProviderError, ProviderId, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_start(&self, provider: &ProviderId, operation: &str) {
        metrics::counter!(
            "selah_provider_start_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_success(&self, provider: &ProviderId, operation: &str, elapsed: Duration) {
        metrics::counter!(
            "selah_provider_success_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "selah_provider_latency_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_failure(
        &self,
        provider: &ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "selah_provider_failure_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => error.kind.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "selah_provider_latency_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_cancel(&self, provider: &ProviderId, operation: &str, elapsed: Duration) {
        metrics::counter!(
            "selah_provider_cancel_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "selah_provider_latency_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "cancelled"
        )
        .record(elapsed.as_secs_f64());
    }
}
