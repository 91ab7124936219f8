//! Transport trait and reqwest-based HTTP implementation with SSE parsing.

use std::pin::Pin;

use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode};

use crate::{ProviderError, ProviderFuture};

use super::serde_api::{ApiResponse, ApiStreamResponse, build_api_request, extract_error_message};
use super::types::{CompatAuth, CompatRequest, CompatResponse};

pub type CompatChunkStream<'a> =
    Pin<Box<dyn Stream<Item = Result<String, ProviderError>> + Send + 'a>>;

pub trait CompatTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatResponse, ProviderError>>;

    fn stream<'a>(
        &'a self,
        request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatChunkStream<'a>, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct CompatHttpTransport {
    client: Client,
    base_url: String,
}

impl CompatHttpTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: CompatRequest, auth: &CompatAuth) -> Result<Response, ProviderError> {
        let api_request = build_api_request(request)?;
        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(auth.token())
            .json(&api_request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        Ok(response)
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("chat request failed with status {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::timeout(message)
            }
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
                ProviderError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ProviderError::unavailable(message)
            }
            _ => ProviderError::transport(message),
        }
    }
}

impl CompatTransport for CompatHttpTransport {
    fn complete<'a>(
        &'a self,
        mut request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatResponse, ProviderError>> {
        Box::pin(async move {
            request.stream = false;
            let fallback_model = request.model.clone();
            let response = self.send(request, &auth).await?;
            let parsed: ApiResponse = response.json().await.map_err(map_reqwest_error)?;
            parsed.into_response(&fallback_model)
        })
    }

    fn stream<'a>(
        &'a self,
        mut request: CompatRequest,
        auth: CompatAuth,
    ) -> ProviderFuture<'a, Result<CompatChunkStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.stream = true;
            let response = self.send(request, &auth).await?;

            let stream = try_stream! {
                let mut bytes = response.bytes_stream();
                let mut lines = SseLineBuffer::default();
                let mut done = false;

                'outer: while let Some(item) = bytes.next().await {
                    let chunk = item.map_err(map_reqwest_error)?;
                    lines.push(&chunk);

                    while let Some(line) = lines.next_line()? {
                        match parse_sse_line(&line)? {
                            SseLine::Skip => continue,
                            SseLine::Done => {
                                done = true;
                                break 'outer;
                            }
                            SseLine::Text(text) => yield text,
                        }
                    }
                }

                // Body closed without a trailing newline.
                if !done {
                    if let Some(line) = lines.finish()? {
                        if let SseLine::Text(text) = parse_sse_line(&line)? {
                            yield text;
                        }
                    }
                }
            };

            Ok(Box::pin(stream) as CompatChunkStream<'a>)
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

/// Accumulates raw bytes and hands out complete lines. Multi-byte characters
/// split across network chunks are reassembled before decoding.
#[derive(Debug, Default)]
pub(crate) struct SseLineBuffer {
    pending: Vec<u8>,
}

impl SseLineBuffer {
    pub(crate) fn push(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    pub(crate) fn next_line(&mut self) -> Result<Option<String>, ProviderError> {
        let Some(index) = self.pending.iter().position(|byte| *byte == b'\n') else {
            return Ok(None);
        };

        let line = self.pending.drain(..=index).collect::<Vec<_>>();
        decode_line(line).map(Some)
    }

    /// Drains whatever is left once the body has ended.
    pub(crate) fn finish(&mut self) -> Result<Option<String>, ProviderError> {
        let line = decode_line(std::mem::take(&mut self.pending))?;
        Ok(Some(line).filter(|line| !line.is_empty()))
    }
}

fn decode_line(bytes: Vec<u8>) -> Result<String, ProviderError> {
    let line = String::from_utf8(bytes)
        .map_err(|err| ProviderError::transport(format!("invalid UTF-8 in stream: {err}")))?;
    Ok(line.trim().to_string())
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SseLine {
    Skip,
    Done,
    Text(String),
}

pub(crate) fn parse_sse_line(line: &str) -> Result<SseLine, ProviderError> {
    let Some(payload) = line.strip_prefix("data:") else {
        return Ok(SseLine::Skip);
    };

    let payload = payload.trim();
    if payload == "[DONE]" {
        return Ok(SseLine::Done);
    }

    if payload.is_empty() {
        return Ok(SseLine::Skip);
    }

    let parsed: ApiStreamResponse = serde_json::from_str(payload)
        .map_err(|err| ProviderError::transport(format!("malformed stream payload: {err}")))?;

    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty());

    Ok(text.map_or(SseLine::Skip, SseLine::Text))
}
