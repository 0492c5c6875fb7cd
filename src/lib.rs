//
//  drone-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Drone Client Library
//!
//! A client for the Drone CI HTTP API that works against both the 0.4
//! ("legacy") server line and the current one, behind a single API.
//!
//! ## Features
//!
//! - **Two Server Generations**: one routing table decides paths and methods
//! - **Typed Results**: commits, builds, repositories and users
//! - **Classified Errors**: not found, forbidden, unauthorized, bad request,
//!   server fault and unreachable server are distinct
//! - **Pluggable Transport**: reqwest by default, any [`api::Transport`] otherwise
//!
//! ## Module Structure
//!
//! - [`api`]: Client, routing, request and response handling
//! - [`config`]: Settings file and environment overrides
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use drone_client::DroneClient;
//!
//! # async fn example() -> Result<(), drone_client::api::ApiError> {
//! let client = DroneClient::current("my-token", "https://drone.example.com")?;
//!
//! for repo in client.repos().list().await? {
//!     println!("{}", repo.full_name());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Differences
//!
//! | Feature | 0.4 | Current |
//! |---------|-----|---------|
//! | Repository create | Yes | No |
//! | Repository disable | No | Yes |
//! | Secret encryption | Yes | No |
//! | Branch commit listing | No | Yes |
//! | User sync | No-op | Yes |

/// API client implementation.
///
/// The client handles routing per server generation, authentication,
/// request encoding, error classification and response decoding.
pub mod api;

/// Connection settings.
///
/// Loaded from `config.toml` in the platform configuration directory and
/// overridden by `DRONE_SERVER`, `DRONE_TOKEN` and `DRONE_LEGACY`.
pub mod config;

/// Utility functions and helpers.
pub mod util;

pub use api::{ApiError, DroneClient};
pub use config::Settings;

/// Library version, derived from Cargo.toml.
///
/// ```rust
/// use drone_client::VERSION;
///
/// assert!(!VERSION.is_empty());
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
