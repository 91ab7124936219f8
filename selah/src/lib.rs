//! Selah guidance service.
//!
//! Re-exports the workspace crates and wires them into an axum application:
//! configuration loading, provider registry construction, and the `/api`
//! router.
//!
//! ```rust,no_run
//! use selah::{AppConfig, build_state, server};
//!
//! # fn main() -> Result<(), selah::StartupError> {
//! let config = AppConfig::load()?;
//! for warning in config.validate()? {
//!     eprintln!("{warning}");
//! }
//! let state = build_state(&config)?;
//! let _app = server::router(state, &config.cors_origins);
//! # Ok(())
//! # }
//! ```

mod settings;
mod error;

pub mod prelude;
pub mod runtime;
pub mod server;

pub use schat;
pub use scommon;
pub use sobserve;
pub use sprogram;
pub use sprovider;

pub use settings::{
    AppConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, ProviderConfig,
};
pub use error::{StartupError, StartupErrorKind};
pub use runtime::{AppState, build_registry_from, build_state, chat_service, default_hooks};

pub use schat::{
    ChatError, ChatErrorKind, ChatRequest, ChatResponse, ChatService, GuidanceResult,
    QuickResponse, StreamChunk,
};
pub use scommon::{Clock, FixedClock, SystemClock};
pub use sprogram::{
    ActivityRecorder, CatalogKind, CompletedActivity, ContentCatalog, ProgramError,
    ProgramSchedule, SchedulePlanner, StaticCatalog,
};
pub use sprovider::{
    ModelProvider, ProviderError, ProviderId, ProviderKind, ProviderRegistry, ProviderSettings,
};
