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

//! Raffle CLI reads recorded entries from AWS S3.

use anyhow::{anyhow, bail, Result};
use clap::{Arg, ArgMatches, Command};
use raffle::config::RAFFLE_ENTRY_PREFIX;
use raffle::prelude::*;

pub fn command_args() -> Command<'static> {
    Command::new("entry")
        .about("Reads recorded entries from AWS S3")
        .arg(
            Arg::new("get entry")
                .short('g')
                .long("get")
                .value_name("TICKET")
                .help("Prints the entry recorded under a ticket")
                .takes_value(true),
        )
        .arg(
            Arg::new("list entries")
                .short('l')
                .long("list")
                .help("Lists the tickets of all recorded entries"),
        )
}

pub async fn command(matches: &ArgMatches) -> Result<()> {
    let bucket = RaffleConfig::from_env(&ProcessEnvironment)?.bucket;
    let store = S3EntryStore::new(ProcessEnvironment)?;

    if let Some(ticket) = matches.value_of("get entry") {
        let entry = get_entry(&store, &bucket, ticket.parse()?).await?;
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else if matches.is_present("list entries") {
        for ticket in list_tickets(&store, &bucket).await? {
            println!("{}", ticket);
        }
    } else {
        bail!("Either --get or --list is required.");
    }

    Ok(())
}

/// Reads the entry recorded under `ticket`.
pub async fn get_entry<S: EntryStore>(store: &S, bucket: &str, ticket: Ticket) -> Result<Entry> {
    let bytes = store
        .get(bucket, &ticket.key())
        .await?
        .ok_or_else(|| anyhow!("No entry is recorded under {}.", ticket))?;
    Ok(Entry::from_slice(&bytes)?)
}

/// Lists the tickets of every entry in `bucket`. Keys that are not entry keys
/// are skipped.
pub async fn list_tickets<S: EntryStore>(store: &S, bucket: &str) -> Result<Vec<Ticket>> {
    Ok(store
        .list(bucket, &format!("{}/", *RAFFLE_ENTRY_PREFIX))
        .await?
        .iter()
        .filter_map(|key| Ticket::from_key(key))
        .collect())
}
