//! Streaming fragment contracts and an in-memory stream utility.
//!
//! ```rust
//! use sprovider::{BoxedFragmentStream, VecFragmentStream};
//!
//! let stream = VecFragmentStream::new(vec![Ok("hello".to_string())]);
//! let _boxed: BoxedFragmentStream<'static> = Box::pin(stream);
//! ```

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::ProviderError;

/// Provider text stream contract.
///
/// Invariants for consumers:
/// - Fragments are emitted in arrival order.
/// - An `Err` item ends the useful part of the stream; consumers stop polling.
/// - Once the stream yields `None`, it must not yield additional items.
/// - Dropping the stream before exhaustion releases the upstream connection.
pub trait FragmentStream: Stream<Item = Result<String, ProviderError>> + Send {}

impl<T> FragmentStream for T where T: Stream<Item = Result<String, ProviderError>> + Send {}

pub type BoxedFragmentStream<'a> = Pin<Box<dyn FragmentStream + 'a>>;

#[derive(Debug)]
pub struct VecFragmentStream {
    fragments: VecDeque<Result<String, ProviderError>>,
}

impl VecFragmentStream {
    pub fn new(fragments: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            fragments: fragments.into(),
        }
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(|text| Ok(text.into())).collect())
    }
}

impl Stream for VecFragmentStream {
    type Item = Result<String, ProviderError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<String, ProviderError>>> {
        Poll::Ready(self.fragments.pop_front())
    }
}
