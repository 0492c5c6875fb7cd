//
//  drone-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for both Drone server generations
//!
//! This module provides the error taxonomy shared by every layer of the
//! client: request building, transport, response classification and the
//! resource services.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ErrorKind`] - `Copy` discriminant of [`ApiError`] for cheap matching
//!
//! # Example
//!
//! ```rust
//! use drone_client::api::common::{ApiError, ErrorKind};
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::NotFound) => println!("No such resource"),
//!         Err(e) if e.kind() == ErrorKind::Unauthorized => println!("Please log in"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use thiserror::Error;

/// Boxed error used for failures whose concrete type depends on the source
/// (reqwest, a caller-supplied transport, serde_json, serde_yaml).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for all Drone API operations.
///
/// The set of variants is closed. Status-derived variants carry no payload
/// because the server body is never consulted once a status has been
/// classified.
///
/// # Variants
///
/// | Variant | Description | Source |
/// |---------|-------------|--------|
/// | `NotFound` | Requested resource does not exist | 404 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `Unauthorized` | Missing or rejected token | 401 |
/// | `BadRequest` | Invalid request parameters | 400 |
/// | `InternalServerError` | Server fault | 500 |
/// | `Transport` | Connection, DNS or I/O failure | N/A |
/// | `Decode` | Body or payload could not be (de)serialized | N/A |
/// | `Unsupported` | Operation has no meaning on the active generation | N/A |
/// | `InvalidUrl` | Base URL plus path could not be parsed | N/A |
#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested resource was not found (HTTP 404).
    #[error("Not Found")]
    NotFound,

    /// Access to the resource is forbidden (HTTP 403).
    #[error("Forbidden")]
    Forbidden,

    /// The token is missing, expired or rejected (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,

    /// The request was malformed (HTTP 400).
    #[error("Bad Request")]
    BadRequest,

    /// The server failed while handling the request (HTTP 500).
    #[error("Internal Server Error")]
    InternalServerError,

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors
    /// and failures while reading the response body.
    #[error("Network error: {0}")]
    Transport(#[source] BoxError),

    /// A response body could not be decoded into the requested shape, or a
    /// request payload could not be serialized.
    #[error("Decode error: {0}")]
    Decode(#[source] BoxError),

    /// The operation does not exist on the server generation the client
    /// was built for.
    ///
    /// # Parameters
    ///
    /// - `0` - Name of the logical operation
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Discriminant of [`ApiError`] without its payload.
///
/// Useful when a caller only needs to branch on the category of a failure,
/// or when comparing errors in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Unauthorized,
    BadRequest,
    InternalServerError,
    TransportFailure,
    DecodeFailure,
    UnsupportedOperation,
    InvalidUrl,
}

impl ApiError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::Forbidden => ErrorKind::Forbidden,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::BadRequest => ErrorKind::BadRequest,
            Self::InternalServerError => ErrorKind::InternalServerError,
            Self::Transport(_) => ErrorKind::TransportFailure,
            Self::Decode(_) => ErrorKind::DecodeFailure,
            Self::Unsupported(_) => ErrorKind::UnsupportedOperation,
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
        }
    }

    /// Maps an HTTP status code onto the status-derived variants.
    ///
    /// Only the five codes the Drone API documents are recognised; every
    /// other code yields `None` and the caller carries on to decoding.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            404 => Some(Self::NotFound),
            403 => Some(Self::Forbidden),
            401 => Some(Self::Unauthorized),
            400 => Some(Self::BadRequest),
            500 => Some(Self::InternalServerError),
            _ => None,
        }
    }

    /// Wraps any transport-level failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Transport(err.into())
    }

    /// Wraps any (de)serialization failure.
    pub fn decode<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Decode(err.into())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err)
        } else {
            Self::transport(err)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err)
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::decode(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_table() {
        assert_eq!(ApiError::from_status(404).map(|e| e.kind()), Some(ErrorKind::NotFound));
        assert_eq!(ApiError::from_status(403).map(|e| e.kind()), Some(ErrorKind::Forbidden));
        assert_eq!(ApiError::from_status(401).map(|e| e.kind()), Some(ErrorKind::Unauthorized));
        assert_eq!(ApiError::from_status(400).map(|e| e.kind()), Some(ErrorKind::BadRequest));
        assert_eq!(
            ApiError::from_status(500).map(|e| e.kind()),
            Some(ErrorKind::InternalServerError)
        );
    }

    #[test]
    fn test_from_status_passes_through_other_codes() {
        for status in [200, 201, 204, 302, 409, 429, 502, 503] {
            assert!(ApiError::from_status(status).is_none(), "status {}", status);
        }
    }

    #[test]
    fn test_decode_error_keeps_kind() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
        assert!(err.to_string().starts_with("Decode error"));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(ApiError::NotFound.to_string(), "Not Found");
        assert_eq!(
            ApiError::Unsupported("repo disable").to_string(),
            "Unsupported operation: repo disable"
        );
    }
}
