//! Common imports for embedding the service.

pub use crate::server::{ApiError, router};
pub use crate::{
    AppConfig, AppState, ChatRequest, ChatService, Clock, ContentCatalog, ModelProvider,
    ProviderId, ProviderRegistry, StartupError, StaticCatalog, build_state,
};
