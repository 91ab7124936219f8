//! Runtime wiring: providers, chat orchestration, planner, recorder, catalog.

use std::sync::Arc;

use schat::ChatService;
use scommon::{Clock, SystemClock};
use sobserve::{
    FanoutProviderHooks, MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks,
};
use sprogram::{ActivityRecorder, ContentCatalog, SchedulePlanner, StaticCatalog};
use sprovider::{ProviderOperationHooks, ProviderRegistry, build_registry};

use crate::{AppConfig, StartupError};

/// Shared, immutable per-process state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub planner: SchedulePlanner,
    pub recorder: ActivityRecorder,
    pub catalog: Arc<dyn ContentCatalog>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(chat: ChatService, catalog: Arc<dyn ContentCatalog>) -> Self {
        Self {
            chat,
            planner: SchedulePlanner::new(),
            recorder: ActivityRecorder::new(),
            catalog,
            clock: Arc::new(SystemClock),
        }
    }

    /// Pins the clock used for default start dates and activity timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.recorder = ActivityRecorder::with_clock(Arc::clone(&clock));
        self.clock = clock;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("chat", &self.chat)
            .field("recorder", &self.recorder)
            .finish_non_exhaustive()
    }
}

/// Tracing and metrics hooks, each isolated from panics.
pub fn default_hooks() -> Arc<dyn ProviderOperationHooks> {
    Arc::new(
        FanoutProviderHooks::new()
            .with(SafeProviderHooks::new(TracingObservabilityHooks))
            .with(SafeProviderHooks::new(MetricsObservabilityHooks)),
    )
}

pub fn build_registry_from(config: &AppConfig) -> Result<ProviderRegistry, StartupError> {
    let settings = config.provider_settings()?;
    let default = config.default_provider_id();
    Ok(build_registry(&settings, default.as_ref())?)
}

pub fn chat_service(registry: Arc<ProviderRegistry>, config: &AppConfig) -> ChatService {
    let mut builder = ChatService::builder(registry).hooks(default_hooks());
    if let Some(provider) = config.guidance_provider_id() {
        builder = builder.guidance_provider(provider);
    }
    builder.build()
}

pub fn build_state(config: &AppConfig) -> Result<AppState, StartupError> {
    let registry = Arc::new(build_registry_from(config)?);
    let chat = chat_service(registry, config);
    let catalog: Arc<dyn ContentCatalog> = Arc::new(StaticCatalog::embedded()?);
    Ok(AppState::new(chat, catalog))
}
