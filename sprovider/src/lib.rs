//! Provider contracts, registry, and chat backends.
//!
//! ```rust
//! use sprovider::{Message, ModelRequest, ProviderRegistry};
//!
//! let registry = ProviderRegistry::new();
//! assert!(registry.resolve(Some("gemini")).is_err());
//!
//! let request = ModelRequest::new(vec![Message::user("I need peace")]).with_temperature(0.7);
//! assert!(request.validate().is_ok());
//! ```

mod credentials;
mod error;
mod hooks;
mod model;
mod provider;
mod registry;
mod stream;

pub mod adapters;
pub mod prelude;

#[cfg(feature = "provider-openai-compat")]
mod factory;

pub use credentials::{CredentialStore, SecretString};
pub use error::{ProviderError, ProviderErrorKind};
pub use hooks::{NoopOperationHooks, OPERATION_COMPLETE, OPERATION_STREAM, ProviderOperationHooks};
pub use model::{Message, ModelRequest, ModelResponse, ProviderId, Role, StopReason};
pub use provider::{ModelProvider, ProviderFuture};
pub use registry::{ProviderRegistry, ResolvedProvider};
pub use scommon::GenerationOptions;
pub use stream::{BoxedFragmentStream, FragmentStream, VecFragmentStream};

#[cfg(feature = "provider-openai-compat")]
pub use factory::{ProviderKind, ProviderSettings, build_provider, build_registry};
