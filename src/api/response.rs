//
//  drone-client
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Classification
//!
//! Maps the status of a response onto [`ApiError`] and decodes the body into
//! the shape the caller asked for.
//!
//! ## Status Table
//!
//! | Status | Error |
//! |--------|-------|
//! | 404 | [`ApiError::NotFound`] |
//! | 403 | [`ApiError::Forbidden`] |
//! | 401 | [`ApiError::Unauthorized`] |
//! | 400 | [`ApiError::BadRequest`] |
//! | 500 | [`ApiError::InternalServerError`] |
//!
//! Any other status, error or not, goes on to decoding. A 502 with an HTML
//! body therefore surfaces as a decode error for structured targets.
//!
//! ## Output Targets
//!
//! - `()` - the body is drained and discarded
//! - `String` - a JSON string, or the raw body text when it is not one
//! - [`Json<T>`] - JSON decoded into `T`; anything else is a decode error

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::common::ApiError;
use super::transport::TransportResponse;

/// A shape a response body can be decoded into.
pub trait OutputTarget: Sized + Send {
    /// Whether the body is needed. When `false` the body is drained
    /// without being buffered.
    const READS_BODY: bool = true;

    /// Decodes a complete body.
    fn decode(body: &[u8]) -> Result<Self, ApiError>;
}

impl OutputTarget for () {
    const READS_BODY: bool = false;

    fn decode(_body: &[u8]) -> Result<Self, ApiError> {
        Ok(())
    }
}

impl OutputTarget for String {
    fn decode(body: &[u8]) -> Result<Self, ApiError> {
        Ok(serde_json::from_slice::<String>(body)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned()))
    }
}

/// Structured JSON target.
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> OutputTarget for Json<T>
where
    T: DeserializeOwned + Send,
{
    fn decode(body: &[u8]) -> Result<Self, ApiError> {
        Ok(Json(serde_json::from_slice(body)?))
    }
}

/// Fails with the classified error when `status` is in the status table.
pub fn check_status(status: StatusCode) -> Result<(), ApiError> {
    match ApiError::from_status(status.as_u16()) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Classifies a status and decodes an already buffered body.
pub fn classify<O: OutputTarget>(status: StatusCode, body: &[u8]) -> Result<O, ApiError> {
    check_status(status)?;
    O::decode(body)
}

/// Classifies a live response and decodes its body.
///
/// On a classified status the body is dropped unread. When the target does
/// not need the body it is still read to the end.
pub async fn classify_response<O: OutputTarget>(
    response: TransportResponse,
) -> Result<O, ApiError> {
    check_status(response.status)?;

    if !O::READS_BODY {
        let drained = response.body.drain().await?;
        tracing::trace!("Discarded {} response bytes", drained);
        return O::decode(&[]);
    }

    let body = response.body.bytes().await?;
    O::decode(&body)
}
