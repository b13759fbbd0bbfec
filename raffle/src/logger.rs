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

//! Request-scoped logging.
//!
//! The handler never installs a global logger. It is given a [`log::Log`]
//! sink at construction and wraps it in a [`RequestLogger`] for every
//! invocation, so each line carries the request id of the invocation that
//! produced it.

use log::{Level, Log, Metadata, Record};
use std::fmt;

/// Target of every record emitted by the handler.
pub const LOG_TARGET: &str = "raffle";

/// A logger bound to one invocation.
#[derive(Clone, Copy)]
pub struct RequestLogger<'a> {
    sink:       &'a dyn Log,
    request_id: &'a str,
}

impl<'a> RequestLogger<'a> {
    /// Binds `sink` to the invocation identified by `request_id`.
    pub fn new(sink: &'a dyn Log, request_id: &'a str) -> Self {
        Self { sink, request_id }
    }

    /// Emits `args` at `level`.
    pub fn log(&self, level: Level, args: fmt::Arguments) {
        let metadata = Metadata::builder().level(level).target(LOG_TARGET).build();
        if !self.sink.enabled(&metadata) {
            return;
        }
        self.sink.log(
            &Record::builder()
                .metadata(metadata)
                .module_path(Some(module_path!()))
                .args(format_args!("request_id={} {}", self.request_id, args))
                .build(),
        );
    }

    /// Emits `args` at the info level.
    pub fn info(&self, args: fmt::Arguments) {
        self.log(Level::Info, args)
    }

    /// Emits `args` at the warn level.
    pub fn warn(&self, args: fmt::Arguments) {
        self.log(Level::Warn, args)
    }

    /// Emits `args` at the error level.
    pub fn error(&self, args: fmt::Arguments) {
        self.log(Level::Error, args)
    }
}
