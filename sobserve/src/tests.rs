use std::sync::{Arc, Mutex};
use std::time::Duration;

use sprovider::{OPERATION_COMPLETE, OPERATION_STREAM, ProviderError, ProviderId, ProviderOperationHooks};

use crate::{
    FanoutProviderHooks, MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks,
};

fn exercise(hooks: &dyn ProviderOperationHooks) {
    let provider = ProviderId::new("gemini");
    let error = ProviderError::timeout("provider timeout");

    hooks.on_start(&provider, OPERATION_COMPLETE);
    hooks.on_success(&provider, OPERATION_COMPLETE, Duration::from_millis(40));
    hooks.on_start(&provider, OPERATION_STREAM);
    hooks.on_failure(&provider, OPERATION_STREAM, Duration::from_millis(15), &error);
    hooks.on_start(&provider, OPERATION_STREAM);
    hooks.on_cancel(&provider, OPERATION_STREAM, Duration::from_millis(5));
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise(&MetricsObservabilityHooks);
}

#[derive(Debug, Default)]
struct PanickingHooks;

impl ProviderOperationHooks for PanickingHooks {
    fn on_start(&self, _provider: &ProviderId, _operation: &str) {
        panic!("start hook panic");
    }

    fn on_success(&self, _provider: &ProviderId, _operation: &str, _elapsed: Duration) {
        panic!("success hook panic");
    }

    fn on_failure(
        &self,
        _provider: &ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        panic!("failure hook panic");
    }

    fn on_cancel(&self, _provider: &ProviderId, _operation: &str, _elapsed: Duration) {
        panic!("cancel hook panic");
    }
}

#[test]
fn safe_provider_hooks_swallow_panics() {
    exercise(&SafeProviderHooks::new(PanickingHooks));
}

#[derive(Debug, Default)]
struct CountingHooks {
    calls: Mutex<Vec<&'static str>>,
}

impl ProviderOperationHooks for CountingHooks {
    fn on_start(&self, _provider: &ProviderId, _operation: &str) {
        self.calls.lock().expect("calls lock").push("start");
    }

    fn on_success(&self, _provider: &ProviderId, _operation: &str, _elapsed: Duration) {
        self.calls.lock().expect("calls lock").push("success");
    }

    fn on_failure(
        &self,
        _provider: &ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        self.calls.lock().expect("calls lock").push("failure");
    }

    fn on_cancel(&self, _provider: &ProviderId, _operation: &str, _elapsed: Duration) {
        self.calls.lock().expect("calls lock").push("cancel");
    }
}

#[test]
fn fanout_reaches_every_hook_even_after_a_panicking_one() {
    let first = Arc::new(CountingHooks::default());
    let second = Arc::new(CountingHooks::default());
    let fanout = FanoutProviderHooks::new()
        .with_arc(first.clone())
        .with(SafeProviderHooks::new(PanickingHooks))
        .with_arc(second.clone());

    exercise(&fanout);

    let expected = vec!["start", "success", "start", "failure", "start", "cancel"];
    assert_eq!(*first.calls.lock().expect("calls lock"), expected);
    assert_eq!(*second.calls.lock().expect("calls lock"), expected);
}
