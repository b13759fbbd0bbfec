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

//! Ticket identifiers.

use crate::config::RAFFLE_ENTRY_PREFIX;
use crate::entry::entry_key;
use crate::error::{RaffleError, Result};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A random version 4 UUID identifying one entry.
///
/// Tickets are not checked against storage for collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(Uuid);

impl Ticket {
    /// Generates a fresh ticket.
    pub fn generate() -> Self {
        Ticket(Uuid::new_v4())
    }

    /// The storage key of the entry recorded under this ticket,
    /// `entry/{ticket}.json`.
    pub fn key(&self) -> String {
        entry_key(&self.to_string())
    }

    /// Recovers the ticket from a storage key produced by [`Ticket::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        key.strip_prefix(RAFFLE_ENTRY_PREFIX.as_str())?
            .strip_prefix('/')?
            .strip_suffix(".json")?
            .parse()
            .ok()
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hyphenated_ref())
    }
}

impl FromStr for Ticket {
    type Err = RaffleError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Ticket)
            .map_err(|e| RaffleError::Validation(format!("invalid ticket {}: {}", s, e)))
    }
}
