//
//  drone-client
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Construction
//!
//! Turns a method, a version-resolved path and a [`Payload`] into a
//! [`PreparedRequest`] that any [`Transport`](super::transport::Transport)
//! can send.
//!
//! ## Encoding Rules
//!
//! | Payload | Legacy server | Current server |
//! |---------|---------------|----------------|
//! | `None` | no body, `Content-Length: 0` | no body, `Content-Length: 0` |
//! | `Form` | `application/x-www-form-urlencoded` | `application/json` |
//! | `Raw` | `text/plain`, verbatim | `application/json`, base64 string |
//! | `Json` | `application/json` | `application/json` |
//!
//! ## Authentication
//!
//! A non-empty token is sent as the `access_token` query parameter, after
//! any parameters the path already carries.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use super::common::ApiError;
use super::version::ApiVersion;
use crate::config::has_scheme;

/// Content type for form-encoded bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type for verbatim bodies.
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Content type for JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Name of the query parameter carrying the API token.
pub const TOKEN_PARAM: &str = "access_token";

/// Request body, chosen explicitly at the call site.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    /// No body.
    #[default]
    None,

    /// Flat key/value pairs. Form-encoded for legacy servers.
    Form(BTreeMap<String, String>),

    /// Opaque bytes. Sent verbatim to legacy servers.
    Raw(Vec<u8>),

    /// A structured record, already serialized to a JSON value.
    Json(serde_json::Value),
}

impl Payload {
    /// Serializes `value` into a [`Payload::Json`].
    ///
    /// Serialization happens here, before anything is sent, so a record
    /// that cannot be represented as JSON fails with a decode error.
    pub fn json<T>(value: &T) -> Result<Self, ApiError>
    where
        T: Serialize + ?Sized,
    {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Builds a [`Payload::Form`] from key/value pairs.
    pub fn form<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a [`Payload::Raw`].
    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Raw(bytes.into())
    }

    /// Encodes the payload for the given server generation.
    ///
    /// Returns the body bytes and their content type, or `None` when there
    /// is no body.
    pub fn encode(self, version: ApiVersion) -> Result<Option<(Vec<u8>, &'static str)>, ApiError> {
        let encoded = match (self, version) {
            (Self::None, _) => return Ok(None),
            (Self::Form(fields), ApiVersion::Legacy) => {
                let body = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields.iter())
                    .finish();
                (body.into_bytes(), FORM_CONTENT_TYPE)
            }
            (Self::Raw(bytes), ApiVersion::Legacy) => (bytes, TEXT_CONTENT_TYPE),
            (Self::Form(fields), ApiVersion::Current) => {
                (serde_json::to_vec(&fields)?, JSON_CONTENT_TYPE)
            }
            (Self::Raw(bytes), ApiVersion::Current) => {
                (serde_json::to_vec(&STANDARD.encode(bytes))?, JSON_CONTENT_TYPE)
            }
            (Self::Json(value), _) => (serde_json::to_vec(&value)?, JSON_CONTENT_TYPE),
        };
        Ok(Some(encoded))
    }
}

/// A fully assembled request, ready for a transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    /// The URL path and query with the token removed, for log lines.
    pub fn redacted_target(&self) -> String {
        let query: Vec<String> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != TOKEN_PARAM)
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();

        if query.is_empty() {
            self.url.path().to_string()
        } else {
            format!("{}?{}", self.url.path(), query.join("&"))
        }
    }
}

/// Builds [`PreparedRequest`]s for one client.
///
/// Borrows the client's immutable settings; holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    base_url: &'a str,
    token: &'a str,
    version: ApiVersion,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(base_url: &'a str, token: &'a str, version: ApiVersion) -> Self {
        Self {
            base_url,
            token,
            version,
        }
    }

    /// Joins the base URL and `path`, defaults the scheme to `http` and
    /// appends the token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the result does not parse.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ApiError::InvalidUrl(url::ParseError::EmptyHost));
        }

        let raw = if has_scheme(base) {
            format!("{}{}", base, path)
        } else {
            format!("http://{}{}", base, path)
        };

        let mut url = Url::parse(&raw)?;
        if !self.token.is_empty() {
            url.query_pairs_mut().append_pair(TOKEN_PARAM, self.token);
        }
        Ok(url)
    }

    /// Assembles the request: URL, body and headers.
    ///
    /// Every request asks the server to close the connection afterwards.
    pub fn build(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<PreparedRequest, ApiError> {
        let url = self.url(path)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        let body = match payload.encode(self.version)? {
            Some((bytes, content_type)) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
                headers.insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
                Some(bytes)
            }
            None => {
                headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
                None
            }
        };

        Ok(PreparedRequest {
            method,
            url,
            headers,
            body,
        })
    }
}
