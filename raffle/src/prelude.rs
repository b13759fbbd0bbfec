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

//! A "prelude" for users of the raffle crate.
//!
//! ```
//! use raffle::prelude::*;
//! ```

pub use crate::entry::Entry;
pub use crate::environment::{Environment, ProcessEnvironment, RaffleConfig};
pub use crate::error::{RaffleError, Result};
pub use crate::handler::EntryHandler;
pub use crate::identity::derive_identity;
pub use crate::logger::RequestLogger;
pub use crate::request::{Request, Response, Submission};
pub use crate::sanitize::{sanitize, sanitize_field};
pub use crate::store::{EntryStore, MemoryEntryStore, S3EntryStore, StoreError};
pub use crate::ticket::Ticket;
pub use crate::writer::write_entry;
