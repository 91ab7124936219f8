//! Observability hooks for provider calls.
//!
//! ```rust
//! use sobserve::{FanoutProviderHooks, MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks};
//!
//! let hooks = FanoutProviderHooks::new()
//!     .with(SafeProviderHooks::new(TracingObservabilityHooks))
//!     .with(SafeProviderHooks::new(MetricsObservabilityHooks));
//! assert_eq!(hooks.len(), 2);
//! ```

mod fanout;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use fanout::FanoutProviderHooks;
pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::SafeProviderHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        FanoutProviderHooks, MetricsObservabilityHooks, SafeProviderHooks,
        TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
