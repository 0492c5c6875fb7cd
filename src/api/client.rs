//
//  drone-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Drone API
//!
//! This module provides the dispatcher every resource service goes through.
//! It builds the request, hands it to the [`Transport`] and classifies the
//! response.
//!
//! ## Features
//!
//! - Legacy (0.4) and current server generations behind one client
//! - Token injection as the `access_token` query parameter
//! - Form, verbatim and JSON request bodies
//! - Closed error taxonomy via [`ApiError`]
//! - Raw body streaming for build logs

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;

use super::commits::CommitService;
use super::common::ApiError;
use super::repos::RepoService;
use super::request::{Payload, RequestBuilder};
use super::response::{classify_response, OutputTarget};
use super::transport::{ReqwestTransport, ResponseBody, Transport};
use super::users::UserService;
use super::version::{route, ApiVersion, Operation, Route};
use crate::config::Settings;

/// Everything a client needs, fixed at construction.
///
/// There are no setters. The transport is shared: the caller may keep its
/// own handle to it and reuse it for other clients.
#[derive(Clone)]
pub struct ClientConfig {
    token: String,
    base_url: String,
    version: ApiVersion,
    transport: Arc<dyn Transport>,
}

impl ClientConfig {
    /// Creates a configuration.
    ///
    /// # Parameters
    ///
    /// * `token` - API token; empty means unauthenticated
    /// * `base_url` - Server URL; `http://` is assumed when no scheme is given
    /// * `version` - Server generation
    /// * `transport` - Shared transport used for every call
    pub fn new(
        token: impl Into<String>,
        base_url: impl Into<String>,
        version: ApiVersion,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.into(),
            version,
            transport,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// The main client for a Drone server.
///
/// Cheap to clone and safe to share between tasks; it holds no mutable
/// state.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use drone_client::api::DroneClient;
///
/// // Current server generation
/// let client = DroneClient::current("my-token", "https://drone.example.com")?;
///
/// // A 0.4 server
/// let legacy = DroneClient::legacy("my-token", "drone.example.com:8000")?;
/// # Ok::<(), drone_client::api::ApiError>(())
/// ```
///
/// # Making Calls
///
/// ```rust,no_run
/// use drone_client::api::DroneClient;
///
/// # async fn example() -> Result<(), drone_client::api::ApiError> {
/// let client = DroneClient::current("my-token", "https://drone.example.com")?;
/// let repo = client.repos().get("github.com", "octo", "hello").await?;
/// println!("{} active: {}", repo.full_name(), repo.active);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DroneClient {
    config: Arc<ClientConfig>,
}

impl DroneClient {
    /// Creates a client from a complete configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates a client for a current-generation server using a default
    /// [`ReqwestTransport`].
    pub fn current(token: &str, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::with_transport(
            token,
            base_url,
            ApiVersion::Current,
            Arc::new(ReqwestTransport::new()?),
        ))
    }

    /// Creates a client for a 0.4 server using a default
    /// [`ReqwestTransport`].
    pub fn legacy(token: &str, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self::with_transport(
            token,
            base_url,
            ApiVersion::Legacy,
            Arc::new(ReqwestTransport::new()?),
        ))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(
        token: &str,
        base_url: &str,
        version: ApiVersion,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::new(ClientConfig::new(token, base_url, version, transport))
    }

    /// Creates a client from loaded [`Settings`].
    ///
    /// The transport honours `timeout_secs` when it is set.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let timeout = settings.timeout_secs.map(Duration::from_secs);
        let transport = ReqwestTransport::with_timeout(timeout)?;

        Ok(Self::with_transport(
            settings.token.as_deref().unwrap_or_default(),
            &settings.server,
            ApiVersion::from_legacy_flag(settings.legacy),
            Arc::new(transport),
        ))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn version(&self) -> ApiVersion {
        self.config.version
    }

    /// Returns `true` when this client talks to a 0.4 server.
    pub fn is_legacy(&self) -> bool {
        self.config.version.is_legacy()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Commit and build operations.
    pub fn commits(&self) -> CommitService<'_> {
        CommitService::new(self)
    }

    /// Repository operations.
    pub fn repos(&self) -> RepoService<'_> {
        RepoService::new(self)
    }

    /// User operations.
    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    fn request_builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.config.base_url, &self.config.token, self.config.version)
    }

    /// Makes a request and decodes the response into `O`.
    ///
    /// # Type Parameters
    ///
    /// * `O` - `()` to discard the body, `String` for text, or
    ///   [`Json<T>`](super::response::Json) for a structured value
    ///
    /// # Parameters
    ///
    /// * `method` - HTTP method
    /// * `path` - Version-resolved path, optionally with a query string
    /// * `payload` - Request body
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL cannot be built ([`ApiError::InvalidUrl`])
    /// - The payload cannot be encoded ([`ApiError::Decode`])
    /// - The transport fails ([`ApiError::Transport`])
    /// - The status is 400, 401, 403, 404 or 500
    /// - The body does not decode into `O`
    pub async fn run<O: OutputTarget>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<O, ApiError> {
        let request = self.request_builder().build(method, path, payload)?;
        tracing::debug!("{} {}", request.method, request.redacted_target());

        let response = self.config.transport.send(request).await?;
        tracing::debug!("Response status {}", response.status);

        classify_response(response).await
    }

    /// Makes a request and returns the response body unread.
    ///
    /// The status is not classified: whatever the server sends back,
    /// error pages included, is handed to the caller, who owns the body
    /// from then on.
    pub async fn stream(&self, method: Method, path: &str) -> Result<ResponseBody, ApiError> {
        let request = self.request_builder().build(method, path, Payload::None)?;
        tracing::debug!("{} {} (streamed)", request.method, request.redacted_target());

        let response = self.config.transport.send(request).await?;
        tracing::debug!("Response status {}", response.status);

        Ok(response.body)
    }

    /// Resolves `op` for this client's generation and runs it.
    ///
    /// Returns `Ok(None)` without any network activity when the operation is
    /// a no-op on this generation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unsupported`] without any network activity when
    /// the operation does not exist on this generation, and any error
    /// [`run`](Self::run) returns otherwise.
    pub async fn dispatch<O: OutputTarget>(
        &self,
        op: Operation<'_>,
        payload: Payload,
    ) -> Result<Option<O>, ApiError> {
        match route(&op, self.version()) {
            Route::Call { method, path } => self.run(method, &path, payload).await.map(Some),
            Route::Unsupported(name) => Err(ApiError::Unsupported(name)),
            Route::NoOp => {
                tracing::debug!("Skipping {}: no-op on {:?} servers", op.name(), self.version());
                Ok(None)
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch) for operations that always produce
    /// a value. A no-op route is reported as unsupported.
    pub async fn call<O: OutputTarget>(
        &self,
        op: Operation<'_>,
        payload: Payload,
    ) -> Result<O, ApiError> {
        self.dispatch(op, payload)
            .await?
            .ok_or(ApiError::Unsupported(op.name()))
    }

    /// Resolves `op` and streams the response body.
    pub async fn dispatch_stream(&self, op: Operation<'_>) -> Result<ResponseBody, ApiError> {
        match route(&op, self.version()) {
            Route::Call { method, path } => self.stream(method, &path).await,
            Route::Unsupported(name) => Err(ApiError::Unsupported(name)),
            Route::NoOp => Ok(ResponseBody::empty()),
        }
    }
}
