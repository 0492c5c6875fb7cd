//
//  drone-client
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Server URL Helpers
//!
//! Paths are appended to the server URL verbatim, so a stored server URL
//! must not end in `/`.
//!
//! ```rust
//! use drone_client::config::normalize_server;
//!
//! assert_eq!(normalize_server(" https://drone.example.com/ "), "https://drone.example.com");
//! assert_eq!(normalize_server("drone.local:8000"), "drone.local:8000");
//! ```

/// Trims surrounding whitespace and trailing slashes.
///
/// The scheme is left alone: a URL without one stays without one and is
/// treated as plain HTTP when requests are built.
pub fn normalize_server(server: &str) -> String {
    server.trim().trim_end_matches('/').to_string()
}

/// Returns `true` when `server` carries an explicit scheme.
pub fn has_scheme(server: &str) -> bool {
    server.contains("://")
}
