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

//! This crate contains the AWS S3 backed entry store.

use super::{EntryStore, StoreError};
use crate::config::RAFFLE_ENTRY_CONTENT_TYPE;
use crate::environment::{Environment, RaffleConfig};
use crate::error::{RaffleError, Result};
use async_trait::async_trait;
use rusoto_core::credential::{AwsCredentials, CredentialsError, ProvideAwsCredentials};
use rusoto_core::{ByteStream, HttpClient, Region, RusotoError};
use rusoto_s3::{
    GetObjectError, GetObjectRequest, ListObjectsV2Request, PutObjectRequest, S3Client, S3,
};
use std::error;
use tokio::io::AsyncReadExt;

/// Loads AWS credentials from the variables the configuration guard checks.
///
/// The environment is read again every time a request is signed, so the
/// client never caches a stale or partial configuration.
pub struct ConfiguredCredentials<E> {
    env: E,
}

impl<E: Environment> ConfiguredCredentials<E> {
    /// Creates a provider reading from `env`.
    pub fn new(env: E) -> Self {
        Self { env }
    }
}

#[async_trait]
impl<E: Environment> ProvideAwsCredentials for ConfiguredCredentials<E> {
    async fn credentials(&self) -> std::result::Result<AwsCredentials, CredentialsError> {
        let config = RaffleConfig::from_env(&self.env).map_err(CredentialsError::new)?;
        Ok(AwsCredentials::new(
            config.access_key_id,
            config.secret_access_key,
            config.session_token,
            None,
        ))
    }
}

/// S3EntryStore writes entries as objects in AWS S3.
pub struct S3EntryStore {
    client:       S3Client,
    content_type: String,
}

impl S3EntryStore {
    /// Creates a store in the default region, resolved from `AWS_REGION` or
    /// `AWS_DEFAULT_REGION`.
    pub fn new<E: Environment + 'static>(env: E) -> Result<Self> {
        Self::with_region(env, Region::default())
    }

    /// Creates a store in `region`.
    pub fn with_region<E: Environment + 'static>(env: E, region: Region) -> Result<Self> {
        let dispatcher = HttpClient::new().map_err(|e| RaffleError::AWS(e.to_string()))?;
        Ok(Self {
            client:       S3Client::new_with(dispatcher, ConfiguredCredentials::new(env), region),
            content_type: RAFFLE_ENTRY_CONTENT_TYPE.to_string(),
        })
    }
}

#[async_trait]
impl EntryStore for S3EntryStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
    ) -> std::result::Result<(), StoreError> {
        self.client
            .put_object(PutObjectRequest {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                body: Some(ByteStream::from(body)),
                content_type: Some(self.content_type.clone()),
                ..Default::default()
            })
            .await
            .map_err(store_error)
            .map(|_| ())
    }

    async fn get(
        &self,
        bucket: &str,
        key: &str,
    ) -> std::result::Result<Option<Vec<u8>>, StoreError> {
        let output = match self
            .client
            .get_object(GetObjectRequest {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                ..Default::default()
            })
            .await
        {
            Ok(output) => output,
            Err(RusotoError::Service(GetObjectError::NoSuchKey(_))) => return Ok(None),
            Err(e) => return Err(store_error(e)),
        };

        let mut buf = Vec::new();
        if let Some(body) = output.body {
            body.into_async_read()
                .read_to_end(&mut buf)
                .await
                .map_err(|e| StoreError::Transient(e.to_string()))?;
        }
        Ok(Some(buf))
    }

    async fn list(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> std::result::Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        let mut continuation_token = None;
        loop {
            let resp = self
                .client
                .list_objects_v2(ListObjectsV2Request {
                    bucket: bucket.to_owned(),
                    prefix: Some(prefix.to_owned()),
                    continuation_token,
                    ..Default::default()
                })
                .await
                .map_err(store_error)?;

            keys.extend(resp.contents.into_iter().flatten().filter_map(|obj| obj.key));

            if resp.is_truncated.unwrap_or_default() {
                continuation_token = resp.next_continuation_token;
            } else {
                break;
            }
        }
        Ok(keys)
    }
}

/// Classifies a rusoto failure.
///
/// Most S3 write failures carry no modeled error and surface as
/// `RusotoError::Unknown`, so the HTTP status decides the kind.
pub fn store_error<E: error::Error + 'static>(err: RusotoError<E>) -> StoreError {
    match err {
        RusotoError::Service(e) => StoreError::Rejected(e.to_string()),
        RusotoError::HttpDispatch(e) => StoreError::Transient(e.to_string()),
        RusotoError::Credentials(e) => StoreError::Credentials(e.to_string()),
        RusotoError::Validation(desc) => StoreError::Rejected(desc),
        RusotoError::ParseError(desc) => StoreError::Unknown(desc),
        RusotoError::Unknown(resp) => {
            let desc = format!("{} {}", resp.status, resp.body_as_str());
            match resp.status.as_u16() {
                401 | 403 => StoreError::PermissionDenied(desc),
                404 => StoreError::MissingBucket(desc),
                429 | 500..=599 => StoreError::Transient(desc),
                _ => StoreError::Unknown(desc),
            }
        }
        RusotoError::Blocking => StoreError::Transient("blocking operation failed".to_string()),
    }
}
