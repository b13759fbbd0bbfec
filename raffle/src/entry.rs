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

//! The persisted raffle entry.

use crate::config::RAFFLE_ENTRY_PREFIX;
use crate::error::Result;
use crate::ticket::Ticket;
use serde::{Deserialize, Serialize};

/// Returns `entry/{ticket}.json`.
pub fn entry_key(ticket: &str) -> String {
    format!("{}/{}.json", *RAFFLE_ENTRY_PREFIX, ticket)
}

/// One recorded submission, stored at `entry/{ticket}.json`.
///
/// Entries are written once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The ticket, in its hyphenated textual form.
    pub ticket:   String,
    /// The sanitized display name.
    pub name:     String,
    /// The sanitized email address. It is not validated as an address.
    pub email:    String,
    /// The sanitized prize preference.
    pub prize:    String,
    /// The identity token, or an empty string.
    pub identity: String,
}

impl Entry {
    /// Creates the entry recorded under `ticket`.
    pub fn new(
        ticket: &Ticket,
        name: String,
        email: String,
        prize: String,
        identity: String,
    ) -> Self {
        Entry {
            ticket: ticket.to_string(),
            name,
            email,
            prize,
            identity,
        }
    }

    /// The storage key of this entry.
    pub fn key(&self) -> String {
        entry_key(&self.ticket)
    }

    /// Serializes the entry as UTF-8 JSON.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserializes an entry from UTF-8 JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
