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

//! The request handler.
//!
//! An invocation runs through these stages, stopping at the first failure:
//!
//! | stage            | failure              | status |
//! |------------------|----------------------|--------|
//! | configuration    | missing variable     | 500    |
//! | body parsing     | malformed body       | 400    |
//! | name, email and prize sanitization | missing or empty | 400 |
//! | identity         | never fails          |        |
//! | ticket           | never fails          |        |
//! | entry write      | any store failure    | 400    |
//!
//! A response carries no detail about a failure; the reason is logged.

use crate::entry::Entry;
use crate::environment::{Environment, RaffleConfig};
use crate::error::{RaffleError, Result};
use crate::identity::derive_identity;
use crate::logger::RequestLogger;
use crate::request::{Request, Response};
use crate::sanitize::sanitize_field;
use crate::store::EntryStore;
use crate::ticket::Ticket;
use crate::writer::write_entry;
use log::Log;
use std::sync::Arc;

/// Records raffle entries.
///
/// The handler holds no per-request state, so one instance serves any number
/// of concurrent invocations.
pub struct EntryHandler<E, S> {
    env:    E,
    store:  S,
    logger: Arc<dyn Log>,
}

impl<E: Environment, S: EntryStore> EntryHandler<E, S> {
    /// Creates a handler reading its configuration from `env`, writing entries
    /// to `store` and logging to `logger`.
    pub fn new(env: E, store: S, logger: Arc<dyn Log>) -> Self {
        Self { env, store, logger }
    }

    /// The store entries are written to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles one invocation.
    ///
    /// # Arguments
    /// * `request` - The event delivered by the platform.
    /// * `request_id` - The invocation id, used to correlate log lines.
    pub async fn handle(&self, request: Request, request_id: &str) -> Response {
        let log = RequestLogger::new(self.logger.as_ref(), request_id);
        match self.record(&request, &log).await {
            Ok(ticket) => Response::recorded(&ticket),
            Err(e) => Response::status(e.status_code()),
        }
    }

    async fn record(&self, request: &Request, log: &RequestLogger<'_>) -> Result<Ticket> {
        let config = RaffleConfig::from_env(&self.env).map_err(|e| {
            log.error(format_args!("{}", e));
            e
        })?;

        let submission = request.submission().map_err(|e| {
            log.error(format_args!(
                "Rejecting request because the body could not be parsed: {}",
                e
            ));
            RaffleError::Validation(format!("malformed body: {}", e))
        })?;

        let name = required("name", submission.name.as_deref(), log)?;
        let email = required("email", submission.email_address.as_deref(), log)?;
        let prize = required("prize", submission.first_preference.as_deref(), log)?;

        let identity = derive_identity(request.headers.as_ref());
        let ticket = Ticket::generate();

        let entry = Entry::new(&ticket, name, email, prize, identity);
        write_entry(&self.store, &config.bucket, &entry, log).await?;

        log.info(format_args!(
            "successfully recorded entry {} from {}",
            ticket, entry.name
        ));
        Ok(ticket)
    }
}

fn required(field: &str, raw: Option<&str>, log: &RequestLogger<'_>) -> Result<String> {
    sanitize_field(raw).ok_or_else(|| {
        log.error(format_args!(
            "Rejecting request because {} parameter is missing or invalid: length={}",
            field,
            raw.map(|value| value.chars().count()).unwrap_or(0)
        ));
        RaffleError::Validation(format!("{} is missing or invalid", field))
    })
}
