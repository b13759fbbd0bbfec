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

//! Shared fixtures for the unit tests.

use crate::store::{EntryStore, StoreError};
use async_trait::async_trait;
use log::{Level, Log, Metadata, Record};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// An environment with every required variable set.
pub fn configured_env() -> HashMap<String, String> {
    [
        ("bucket_name", "raffle-entries"),
        ("aws_access_key_id", "AKIDEXAMPLE"),
        ("aws_secret_access_key", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Keeps every record it is given.
pub struct CapturingLogger {
    level: Level,
    lines: Mutex<Vec<(Level, String)>>,
}

impl Default for CapturingLogger {
    fn default() -> Self {
        Self::with_level(Level::Trace)
    }
}

impl CapturingLogger {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            lines: Mutex::new(vec![]),
        }
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, line)| line.contains(needle))
    }
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.lines
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

/// A store whose writes always fail.
pub struct FailingStore {
    error:    StoreError,
    attempts: AtomicUsize,
    last_key: Mutex<Option<String>>,
}

impl FailingStore {
    pub fn new(error: StoreError) -> Self {
        Self {
            error,
            attempts: AtomicUsize::new(0),
            last_key: Mutex::new(None),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn last_key(&self) -> Option<String> {
        self.last_key.lock().unwrap().clone()
    }
}

#[async_trait]
impl EntryStore for FailingStore {
    async fn put(&self, _: &str, key: &str, _: Vec<u8>) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(key.to_owned());
        Err(self.error.clone())
    }

    async fn get(&self, _: &str, _: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Err(self.error.clone())
    }

    async fn list(&self, _: &str, _: &str) -> Result<Vec<String>, StoreError> {
        Err(self.error.clone())
    }
}
