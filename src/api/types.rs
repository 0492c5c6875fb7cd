//
//  drone-client
//  api/types.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Drone Resource Types
//!
//! Records exchanged with both server generations. Field names follow the
//! JSON the server emits. Every field is optional on the wire: missing
//! fields take their default value, matching how the server omits zero
//! values.
//!
//! Timestamps are Unix seconds. Use the `*_at` helpers to obtain
//! [`chrono::DateTime`] values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{format_duration, short_sha, timestamp_to_datetime};

/// A Drone user account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Database identifier. Never sent to or read from the server.
    #[serde(skip)]
    pub id: i64,

    /// Remote the account comes from (e.g. `github.com`).
    pub remote: String,
    pub login: String,
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,

    pub gravatar: String,
    pub admin: bool,
    pub active: bool,
    pub syncing: bool,

    #[serde(rename = "created_at")]
    pub created: i64,

    #[serde(rename = "updated_at")]
    pub updated: i64,

    pub token: String,
}

impl User {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.created)
    }
}

/// A repository registered with Drone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repo {
    pub remote: String,
    pub host: String,
    pub owner: String,
    pub name: String,
    pub url: String,
    pub clone_url: String,
    pub git_url: String,
    pub ssh_url: String,
    pub link_url: String,
    pub active: bool,
    pub private: bool,
    pub privileged: bool,

    #[serde(rename = "post_commits")]
    pub post_commit: bool,

    #[serde(rename = "pull_requests")]
    pub pull_request: bool,

    pub public_key: String,
    pub private_key: String,

    /// Build timeout in minutes.
    pub timeout: i64,

    #[serde(rename = "created_at")]
    pub created: i64,

    #[serde(rename = "updated_at")]
    pub updated: i64,

    pub hook_token: String,
}

impl Repo {
    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A commit as tracked by a current-generation server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    pub id: i64,
    pub status: String,

    #[serde(rename = "started_at")]
    pub started: i64,

    #[serde(rename = "finished_at")]
    pub finished: i64,

    /// Build duration in seconds.
    pub duration: i64,

    pub sha: String,
    pub branch: String,
    pub pull_request: String,
    pub author: String,
    pub gravatar: String,
    pub timestamp: String,
    pub message: String,

    #[serde(rename = "created_at")]
    pub created: i64,

    #[serde(rename = "updated_at")]
    pub updated: i64,
}

impl Commit {
    /// The first eight characters of the commit hash.
    pub fn sha_short(&self) -> &str {
        short_sha(&self.sha)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.started)
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.finished)
    }

    /// Duration formatted for display, e.g. `2m 5s`.
    pub fn duration_display(&self) -> String {
        format_duration(std::time::Duration::from_secs(self.duration.max(0) as u64))
    }
}

/// A build as tracked by a 0.4 server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    pub number: i32,
    pub event: String,
    pub status: String,

    #[serde(rename = "enqueued_at")]
    pub enqueued: i64,

    #[serde(rename = "created_at")]
    pub created: i64,

    #[serde(rename = "started_at")]
    pub started: i64,

    #[serde(rename = "finished_at")]
    pub finished: i64,

    pub commit: String,
    pub branch: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub refspec: String,
    pub remote: String,
    pub title: String,
    pub message: String,
    pub timestamp: i64,
    pub author: String,

    #[serde(rename = "author_avatar")]
    pub avatar: String,

    #[serde(rename = "author_email")]
    pub email: String,

    #[serde(rename = "link_url")]
    pub link: String,
}

impl Build {
    pub fn commit_short(&self) -> &str {
        short_sha(&self.commit)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.started)
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.finished)
    }

    /// Wall-clock run time, or `None` while the build has not finished.
    pub fn duration_display(&self) -> Option<String> {
        if self.started <= 0 {
            return None;
        }
        let secs = self.finished.checked_sub(self.started).filter(|d| *d >= 0)? as u64;
        Some(format_duration(std::time::Duration::from_secs(secs)))
    }
}

/// Secrets to encrypt for a repository, serialized as YAML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Secrets {
    /// `KEY=value` entries injected into the build environment.
    #[serde(default)]
    pub environment: Vec<String>,
}

impl Secrets {
    pub fn new<I, S>(environment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            environment: environment.into_iter().map(Into::into).collect(),
        }
    }

    /// Encodes the secrets as the YAML document the server expects.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
