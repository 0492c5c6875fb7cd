//
//  drone-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Drone REST API.
//!
//! ## Supported Server Generations
//!
//! - **Legacy**: the 0.4 server line, repositories addressed as `{owner}/{name}`
//! - **Current**: repositories addressed as `{host}/{owner}/{name}`
//!
//! ## Architecture
//!
//! - [`version`]: Per-operation routing table for both generations
//! - [`request`]: URL, token, body and header assembly
//! - [`transport`]: The network capability and its reqwest implementation
//! - [`response`]: Status classification and body decoding
//! - [`client`]: The dispatcher tying the above together
//! - [`commits`], [`repos`], [`users`]: Resource operations
//! - [`types`]: Resource records
//! - [`common`]: Error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use drone_client::api::DroneClient;
//!
//! # async fn example() -> Result<(), drone_client::api::ApiError> {
//! let client = DroneClient::legacy("my-token", "drone.example.com")?;
//! let me = client.users().current().await?;
//! println!("Logged in as {}", me.login);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! API errors are returned as [`ApiError`] variants:
//!
//! - `NotFound`: 404
//! - `Forbidden`: 403
//! - `Unauthorized`: 401
//! - `BadRequest`: 400
//! - `InternalServerError`: 500
//! - `Transport`: the server could not be reached
//! - `Decode`: a body or payload could not be (de)serialized
//! - `Unsupported`: the operation does not exist on this server generation

pub mod client;
pub mod commits;
pub mod common;
pub mod repos;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;
pub mod users;
pub mod version;

pub use client::{ClientConfig, DroneClient};
pub use common::{ApiError, ErrorKind};
pub use request::{Payload, PreparedRequest};
pub use response::{Json, OutputTarget};
pub use transport::{ReqwestTransport, ResponseBody, Transport, TransportResponse};
pub use types::{Build, Commit, Repo, Secrets, User};
pub use version::ApiVersion;
