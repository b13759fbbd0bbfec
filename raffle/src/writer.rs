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

//! Writes an entry to its store.

use crate::entry::Entry;
use crate::error::{RaffleError, Result};
use crate::logger::RequestLogger;
use crate::store::{EntryStore, StoreError};

/// Writes `entry` to `bucket` at `entry/{ticket}.json`.
///
/// The write is attempted exactly once and overwrites unconditionally. Any
/// failure is logged with the ticket and the store's reason, and returned as
/// [`RaffleError::Storage`].
pub async fn write_entry<S: EntryStore + ?Sized>(
    store: &S,
    bucket: &str,
    entry: &Entry,
    log: &RequestLogger<'_>,
) -> Result<()> {
    let key = entry.key();
    log.info(format_args!(
        "writing entry information to s3://{}/{}",
        bucket, key
    ));

    let outcome = match entry.to_bytes() {
        Ok(body) => store.put(bucket, &key, body).await,
        Err(e) => Err(StoreError::Rejected(e.to_string())),
    };

    outcome.map_err(|source| {
        log.error(format_args!(
            "failed to write entry {} due to an error: {}",
            entry.ticket, source
        ));
        RaffleError::Storage {
            ticket: entry.ticket.clone(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryEntryStore;
    use crate::test_util::{CapturingLogger, FailingStore};
    use crate::ticket::Ticket;
    use log::Level;

    fn entry() -> Entry {
        Entry::new(
            &Ticket::generate(),
            "Grace Hopper".to_string(),
            "grace@example.com".to_string(),
            "A compiler".to_string(),
            "ab".repeat(64),
        )
    }

    #[tokio::test]
    async fn writes_once_under_the_entry_key() -> Result<()> {
        let sink = CapturingLogger::default();
        let log = RequestLogger::new(&sink, "req-1");
        let store = MemoryEntryStore::new();
        let entry = entry();

        write_entry(&store, "raffle-entries", &entry, &log).await?;

        assert_eq!(1, store.put_count());
        let stored = store
            .get("raffle-entries", &format!("entry/{}.json", entry.ticket))
            .await
            .map_err(|e| RaffleError::Internal(e.to_string()))?
            .ok_or("entry is missing")?;
        assert_eq!(entry, Entry::from_slice(&stored)?);
        assert!(sink.contains(&format!(
            "s3://raffle-entries/entry/{}.json",
            entry.ticket
        )));
        Ok(())
    }

    #[tokio::test]
    async fn failure_is_logged_with_ticket() {
        let sink = CapturingLogger::default();
        let log = RequestLogger::new(&sink, "req-2");
        let store = FailingStore::new(StoreError::PermissionDenied("Access Denied".to_string()));
        let entry = entry();

        match write_entry(&store, "raffle-entries", &entry, &log).await {
            Err(RaffleError::Storage { ticket, source }) => {
                assert_eq!(entry.ticket, ticket);
                assert_eq!(
                    StoreError::PermissionDenied("Access Denied".to_string()),
                    source
                );
            }
            other => panic!("expected a storage error, got {:?}", other),
        }
        assert_eq!(1, store.attempts());

        let errors: Vec<String> = sink
            .lines()
            .into_iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, line)| line)
            .collect();
        assert_eq!(1, errors.len());
        assert!(errors[0].contains(&entry.ticket));
        assert!(errors[0].contains("Access Denied"));
    }
}
