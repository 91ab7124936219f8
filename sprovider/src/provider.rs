use crate::{BoxedFragmentStream, ModelRequest, ModelResponse, ProviderError, ProviderId};

pub use scommon::BoxFuture as ProviderFuture;

/// Uniform capability every chat backend exposes.
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    /// Opens a lazy fragment stream. Failures before the first fragment are
    /// returned here; later failures arrive as `Err` items.
    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedFragmentStream<'a>, ProviderError>>;
}
