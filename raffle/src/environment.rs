// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Environment lookup and the configuration guard.
//!
//! Every invocation re-reads its configuration through an [`Environment`], so
//! a missing value fails that invocation only and is reported by name.

use crate::config::*;
use crate::error::{RaffleError, Result};
use std::collections::HashMap;

/// A read-only source of configuration values.
pub trait Environment: Send + Sync {
    /// Returns the value of `key`, if it is set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

impl<E: Environment + ?Sized> Environment for std::sync::Arc<E> {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// The configuration an invocation needs before it may touch storage.
#[derive(Clone, PartialEq, Eq)]
pub struct RaffleConfig {
    /// The bucket entries are written to.
    pub bucket:            String,
    /// The AWS access key id.
    pub access_key_id:     String,
    /// The AWS secret access key.
    pub secret_access_key: String,
    /// The AWS session token, for temporary credentials.
    pub session_token:     Option<String>,
}

impl RaffleConfig {
    /// Reads and checks the configuration.
    ///
    /// The bucket name, the access key id and the secret are checked in that
    /// order; the first one that is missing or empty is returned as
    /// [`RaffleError::Configuration`].
    pub fn from_env<E: Environment + ?Sized>(env: &E) -> Result<Self> {
        let bucket = required(env, &RAFFLE_BUCKET_VAR)?;
        let access_key_id = required(env, &RAFFLE_ACCESS_KEY_VAR)?;
        let secret_access_key = required(env, &RAFFLE_SECRET_KEY_VAR)?;
        let session_token = env
            .var(&RAFFLE_SESSION_TOKEN_VAR)
            .filter(|token| !token.is_empty());

        Ok(RaffleConfig {
            bucket,
            access_key_id,
            secret_access_key,
            session_token,
        })
    }
}

// The secret must never reach the logs.
impl std::fmt::Debug for RaffleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaffleConfig")
            .field("bucket", &self.bucket)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn required<E: Environment + ?Sized>(env: &E, name: &str) -> Result<String> {
    match env.var(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RaffleError::Configuration(name.to_owned())),
    }
}
