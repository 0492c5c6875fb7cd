//
//  drone-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The client only needs one capability from the network: send a
//! [`PreparedRequest`] once and hand back the status, headers and a body
//! stream. That capability is the [`Transport`] trait.
//!
//! [`ReqwestTransport`] is the default implementation. Hosts that already own
//! an HTTP stack, and tests, can supply their own.
//!
//! ## Requirements on implementations
//!
//! - `Send + Sync`: one transport is shared by every clone of a client.
//! - Single attempt: no retries, no redirects to other hosts on behalf of
//!   the caller beyond what the underlying client does by default.
//! - Timeouts are the transport's own policy.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};

use super::common::ApiError;
use super::request::PreparedRequest;

/// A response body that has not been read yet.
///
/// Yields the body in chunks. Dropping it releases the underlying
/// connection.
pub struct ResponseBody {
    inner: BoxStream<'static, Result<Vec<u8>, ApiError>>,
}

impl ResponseBody {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Vec<u8>, ApiError>> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
        }
    }

    /// A body made of a single, already available chunk.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        Self::new(stream::once(async move { Ok(bytes) }))
    }

    pub fn empty() -> Self {
        Self::new(stream::empty())
    }

    /// Reads the whole body into memory.
    pub async fn bytes(mut self) -> Result<Vec<u8>, ApiError> {
        let mut out = Vec::new();
        while let Some(chunk) = self.inner.next().await {
            out.extend_from_slice(&chunk?);
        }
        Ok(out)
    }

    /// Reads the whole body as text, replacing invalid UTF-8.
    pub async fn text(self) -> Result<String, ApiError> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads and discards the whole body, returning how many bytes it held.
    pub async fn drain(mut self) -> Result<u64, ApiError> {
        let mut total = 0u64;
        while let Some(chunk) = self.inner.next().await {
            total += chunk?.len() as u64;
        }
        Ok(total)
    }
}

impl Stream for ResponseBody {
    type Item = Result<Vec<u8>, ApiError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody").finish_non_exhaustive()
    }
}

/// What a transport hands back for one request.
#[derive(Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

/// The network capability the client depends on.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` once.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response could be obtained.
    /// HTTP error statuses are not errors at this level.
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse, ApiError>;
}

/// [`Transport`] backed by a [`reqwest::Client`].
///
/// The client keeps no idle connections, so every call opens and closes its
/// own connection.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport without a request timeout.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeout(None)
    }

    /// Creates a transport that gives up on a request after `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder()
            .user_agent(format!("drone-client/{}", crate::VERSION))
            .pool_max_idle_per_host(0);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build().map_err(ApiError::transport)?,
        })
    }

    /// Wraps an existing client as-is.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<TransportResponse, ApiError> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(ApiError::transport)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = ResponseBody::new(
            response
                .bytes_stream()
                .map_ok(|chunk| chunk.to_vec())
                .map_err(ApiError::transport),
        );

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_body_collects_chunks() {
        let body = ResponseBody::new(stream::iter(vec![
            Ok(b"hello ".to_vec()),
            Ok(b"world".to_vec()),
        ]));
        assert_eq!(body.text().await.unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_drain_counts_bytes() {
        let body = ResponseBody::from_bytes("0123456789");
        assert_eq!(body.drain().await.unwrap(), 10);
        assert_eq!(ResponseBody::empty().drain().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_chunk_error_surfaces() {
        let body = ResponseBody::new(stream::iter(vec![
            Ok(b"partial".to_vec()),
            Err(ApiError::transport("connection reset")),
        ]));
        let err = body.bytes().await.unwrap_err();
        assert_eq!(err.kind(), crate::api::common::ErrorKind::TransportFailure);
    }
}
