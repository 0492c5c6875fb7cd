//
//  drone-client
//  api/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # User Operations
//!
//! Account management. 0.4 servers address users by login alone and have no
//! repository sync, so [`UserService::sync`] succeeds there without a
//! request.
//!
//! ## Example
//!
//! ```rust,no_run
//! use drone_client::api::{DroneClient, Payload};
//!
//! # async fn example() -> Result<(), drone_client::api::ApiError> {
//! let client = DroneClient::legacy("admin-token", "drone.example.com")?;
//!
//! let user = client
//!     .users()
//!     .create("github.com", "octocat", Payload::form([("login", "octocat")]))
//!     .await?;
//! println!("Created {}", user.login);
//! # Ok(())
//! # }
//! ```

use super::client::DroneClient;
use super::common::ApiError;
use super::request::Payload;
use super::response::Json;
use super::types::User;
use super::version::Operation;

/// User operations, borrowed from a [`DroneClient`].
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a DroneClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a DroneClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, login: &str) -> Result<User, ApiError> {
        let op = Operation::UserGet { login };
        let Json(user): Json<User> = self.client.call(op, Payload::None).await?;
        Ok(user)
    }

    /// The user the token belongs to.
    pub async fn current(&self) -> Result<User, ApiError> {
        let Json(user): Json<User> = self.client.call(Operation::UserCurrent, Payload::None).await?;
        Ok(user)
    }

    /// Asks the server to resynchronise the user's repositories.
    ///
    /// A no-op on 0.4 servers.
    pub async fn sync(&self) -> Result<(), ApiError> {
        self.client
            .dispatch::<()>(Operation::UserSync, Payload::None)
            .await
            .map(|_| ())
    }

    /// Creates an account.
    ///
    /// 0.4 servers expect the account fields in `payload`, usually as
    /// [`Payload::Form`]; current servers take `remote` and `login` from the
    /// path.
    pub async fn create(
        &self,
        remote: &str,
        login: &str,
        payload: Payload,
    ) -> Result<User, ApiError> {
        let op = Operation::UserCreate { remote, login };
        let Json(user): Json<User> = self.client.call(op, payload).await?;
        Ok(user)
    }

    /// Updates selected fields of an account.
    pub async fn patch(&self, login: &str, payload: Payload) -> Result<User, ApiError> {
        let op = Operation::UserPatch { login };
        let Json(user): Json<User> = self.client.call(op, payload).await?;
        Ok(user)
    }

    pub async fn delete(&self, remote: &str, login: &str) -> Result<(), ApiError> {
        self.client
            .call(Operation::UserDelete { remote, login }, Payload::None)
            .await
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let Json(users): Json<Vec<User>> =
            self.client.call(Operation::UserList, Payload::None).await?;
        Ok(users)
    }
}
