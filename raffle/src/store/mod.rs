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

//! Entry stores hold the recorded entries as objects.
//!
//! The handler only ever needs one operation from a store: an unconditional
//! `put` of a serialized entry under its key. `get` and `list` exist so that
//! entries can be read back by operators and tests.
//!
//! Two stores are bundled:
//!
//! - `S3EntryStore`: objects in an AWS S3 bucket. This is what the deployed
//!   function writes to.
//!
//! - `MemoryEntryStore`: objects in a map held by the store itself. Nothing
//!   survives the process; it backs local invocations and tests.

mod memory;
pub use memory::MemoryEntryStore;

mod s3;
pub use self::s3::{ConfiguredCredentials, S3EntryStore};

use async_trait::async_trait;
use std::error;
use std::fmt::{Display, Formatter};

/// Why a store operation failed.
///
/// Callers treat every variant the same way today; the distinction is kept
/// for the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The credentials are valid but not allowed to write to the bucket.
    PermissionDenied(String),
    /// The bucket does not exist.
    MissingBucket(String),
    /// No usable credentials could be loaded.
    Credentials(String),
    /// The request did not complete: network failures, throttling and
    /// server-side errors.
    Transient(String),
    /// The service rejected the request as invalid.
    Rejected(String),
    /// The response could not be interpreted.
    Unknown(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            StoreError::PermissionDenied(ref desc) => write!(f, "permission denied: {}", desc),
            StoreError::MissingBucket(ref desc) => write!(f, "bucket does not exist: {}", desc),
            StoreError::Credentials(ref desc) => write!(f, "credentials error: {}", desc),
            StoreError::Transient(ref desc) => write!(f, "transient failure: {}", desc),
            StoreError::Rejected(ref desc) => write!(f, "request rejected: {}", desc),
            StoreError::Unknown(ref desc) => write!(f, "unknown failure: {}", desc),
        }
    }
}

impl error::Error for StoreError {}

/// The entry store trait defines the interface for entry stores.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Puts `body` at `key` in `bucket`, overwriting any existing object.
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), StoreError>;

    /// Gets the object at `key` in `bucket`, or `None` if it does not exist.
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Returns the keys in `bucket` that begin with `prefix`.
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
impl<S: EntryStore + ?Sized> EntryStore for std::sync::Arc<S> {
    async fn put(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        (**self).put(bucket, key, body).await
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(bucket, key).await
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>, StoreError> {
        (**self).list(bucket, prefix).await
    }
}
