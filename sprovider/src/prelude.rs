//! Common `sprovider` imports for downstream crates.

pub use crate::{
    BoxedFragmentStream, CredentialStore, GenerationOptions, Message, ModelProvider, ModelRequest,
    ModelResponse, NoopOperationHooks, ProviderError, ProviderErrorKind, ProviderFuture,
    ProviderId, ProviderOperationHooks, ProviderRegistry, ResolvedProvider, Role, StopReason,
};
pub use scommon::BoxFuture;
