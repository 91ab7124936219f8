//! Chat-completions adapter for backends that speak the OpenAI wire format.

mod provider;
mod serde_api;
mod transport;
mod types;


pub use provider::CompatibleProvider;
pub use transport::{CompatChunkStream, CompatHttpTransport, CompatTransport};
pub use types::{CompatAuth, CompatFinishReason, CompatMessage, CompatRequest, CompatResponse};
