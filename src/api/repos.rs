//
//  drone-client
//  api/repos.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Operations
//!
//! Repository management for both server generations.
//!
//! ## Platform Differences
//!
//! | Operation | 0.4 | Current |
//! |-----------|-----|---------|
//! | create | Yes | No |
//! | enable | Silently skipped | Yes |
//! | disable | No | Yes |
//! | encrypt secrets | Yes | No |
//!
//! Unavailable operations fail with [`ApiError::Unsupported`] before any
//! request is made.

use serde::Serialize;
use serde_json::json;

use super::client::DroneClient;
use super::common::ApiError;
use super::request::Payload;
use super::response::Json;
use super::types::{Repo, Secrets};
use super::version::{Operation, RepoRef};

/// Repository operations, borrowed from a [`DroneClient`].
#[derive(Debug, Clone, Copy)]
pub struct RepoService<'a> {
    client: &'a DroneClient,
}

impl<'a> RepoService<'a> {
    pub(crate) fn new(client: &'a DroneClient) -> Self {
        Self { client }
    }

    /// Fetches a repository. `host` is ignored by 0.4 servers.
    pub async fn get(&self, host: &str, owner: &str, name: &str) -> Result<Repo, ApiError> {
        let op = Operation::RepoGet(RepoRef::new(host, owner, name));
        let Json(repo): Json<Repo> = self.client.call(op, Payload::None).await?;
        Ok(repo)
    }

    /// Registers a repository without activating it. 0.4 servers only.
    pub async fn create(&self, owner: &str, name: &str) -> Result<Repo, ApiError> {
        let op = Operation::RepoCreate(RepoRef::new("", owner, name));
        let Json(repo): Json<Repo> = self.client.call(op, Payload::None).await?;
        Ok(repo)
    }

    /// Saves `repo`, addressed by its own host, owner and name.
    pub async fn update(&self, repo: &Repo) -> Result<Repo, ApiError> {
        let op = Operation::RepoUpdate(RepoRef::new(&repo.host, &repo.owner, &repo.name));
        let Json(updated): Json<Repo> = self.client.call(op, Payload::json(repo)?).await?;
        Ok(updated)
    }

    /// Activates a repository.
    ///
    /// Returns `Ok(None)` without contacting a 0.4 server, which has no
    /// separate activation step.
    pub async fn enable(
        &self,
        host: &str,
        owner: &str,
        name: &str,
    ) -> Result<Option<Repo>, ApiError> {
        let op = Operation::RepoEnable(RepoRef::new(host, owner, name));
        let repo: Option<Json<Repo>> = self.client.dispatch(op, Payload::None).await?;
        Ok(repo.map(Json::into_inner))
    }

    /// Registers a repository, choosing whether to activate it.
    ///
    /// Only 0.4 servers honour `activate`.
    pub async fn enable_with_activate(
        &self,
        host: &str,
        owner: &str,
        name: &str,
        activate: bool,
    ) -> Result<Repo, ApiError> {
        let op = Operation::RepoEnableWithActivate {
            repo: RepoRef::new(host, owner, name),
            activate,
        };
        let Json(repo): Json<Repo> = self.client.call(op, Payload::None).await?;
        Ok(repo)
    }

    /// Deactivates a repository. Current servers only.
    pub async fn disable(&self, host: &str, owner: &str, name: &str) -> Result<(), ApiError> {
        let op = Operation::RepoDisable(RepoRef::new(host, owner, name));
        self.client.call(op, Payload::None).await
    }

    pub async fn delete(&self, host: &str, owner: &str, name: &str) -> Result<(), ApiError> {
        let op = Operation::RepoDelete(RepoRef::new(host, owner, name));
        self.client.call(op, Payload::None).await
    }

    /// Replaces the deploy key pair.
    pub async fn set_key(
        &self,
        host: &str,
        owner: &str,
        name: &str,
        public_key: &str,
        private_key: &str,
    ) -> Result<(), ApiError> {
        let op = Operation::RepoSetKey(RepoRef::new(host, owner, name));
        let payload = Payload::Json(json!({
            "public_key": public_key,
            "private_key": private_key,
        }));
        self.client.call(op, payload).await
    }

    /// Replaces the build parameters.
    pub async fn set_params<P>(
        &self,
        host: &str,
        owner: &str,
        name: &str,
        params: &P,
    ) -> Result<(), ApiError>
    where
        P: Serialize + ?Sized,
    {
        #[derive(Serialize)]
        struct Params<'p, T: Serialize + ?Sized> {
            params: &'p T,
        }

        let op = Operation::RepoSetParams(RepoRef::new(host, owner, name));
        self.client.call(op, Payload::json(&Params { params })?).await
    }

    /// Encrypts `secrets` with the repository key and returns the
    /// ciphertext. 0.4 servers only.
    ///
    /// The secrets are sent as a YAML document.
    pub async fn encrypt_secrets(
        &self,
        owner: &str,
        name: &str,
        secrets: &Secrets,
    ) -> Result<String, ApiError> {
        let op = Operation::RepoEncryptSecrets(RepoRef::new("", owner, name));
        let body = secrets.to_yaml()?;
        self.client.call(op, Payload::raw(body)).await
    }

    /// Lists the repositories of the authenticated user.
    pub async fn list(&self) -> Result<Vec<Repo>, ApiError> {
        let Json(repos): Json<Vec<Repo>> =
            self.client.call(Operation::RepoList, Payload::None).await?;
        Ok(repos)
    }
}
