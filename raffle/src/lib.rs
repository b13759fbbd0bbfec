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

#![warn(missing_docs, clippy::needless_borrow)]
// Clippy lints, some should be disabled incrementally
#![allow(clippy::new_without_default, clippy::upper_case_acronyms)]

//! `raffle` records prize-draw submissions as tickets in AWS S3.
//!
//! A submission passes through a fixed pipeline: the configuration guard, body
//! parsing, field sanitization, identity derivation, ticket generation and a
//! single write to the entry store. The [`handler::EntryHandler`] drives it
//! and turns the outcome into a Lambda proxy response.

pub mod config;
pub mod entry;
pub mod environment;
pub mod error;
pub mod handler;
pub mod identity;
pub mod logger;
pub mod prelude;
pub mod request;
pub mod sanitize;
pub mod store;
pub mod ticket;
pub mod writer;

#[cfg(test)]
mod test_util;
