//! Guidance chat orchestration over model providers.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use schat::{ChatRequest, ChatService};
//! use sprovider::ProviderRegistry;
//!
//! let service = ChatService::new(Arc::new(ProviderRegistry::new()));
//! assert_eq!(service.quick_responses().len(), 6);
//!
//! let rejected = service.handle_stream(ChatRequest::new("   "));
//! assert!(rejected.is_err());
//! ```

mod error;
mod guidance;
mod prompt;
mod quick;
mod service;
mod types;

pub mod prelude {
    pub use crate::{
        ChatChunkStream, ChatError, ChatErrorKind, ChatRequest, ChatResponse, ChatService,
        ChatServiceBuilder, GuidanceExtractor, GuidanceResult, PromptComposer, QuickResponse,
        StreamChunk,
    };
}

pub use error::{ChatError, ChatErrorKind, PROVIDER_FAILURE_MESSAGE};
pub use guidance::{GuidanceExtractor, decode_guidance};
pub use prompt::{GUIDANCE_PERSONA, Prompt, PromptComposer};
pub use quick::{QUICK_RESPONSES, quick_responses};
pub use service::{ChatService, ChatServiceBuilder};
pub use types::{
    ChatChunkStream, ChatRequest, ChatResponse, FallbackGuidance, GuidanceRequest,
    GuidanceResult, QuickResponse, StreamChunk, StructuredGuidance, Verse,
};
