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

//! Raffle CLI invokes the entry handler in-process with a test submission.

use crate::args::get_logging;
use anyhow::{anyhow, Result};
use clap::{Arg, ArgMatches, Command};
use log::Log;
use rand::Rng;
use raffle::config::{RAFFLE_ACCESS_KEY_VAR, RAFFLE_BUCKET_VAR, RAFFLE_SECRET_KEY_VAR};
use raffle::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use uuid::Uuid;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The settings used by `--local` for any variable the process lacks.
const LOCAL_BUCKET: &str = "raffle-local";
const LOCAL_CREDENTIAL: &str = "local";

pub fn command_args() -> Command<'static> {
    Command::new("invoke")
        .about("Invokes the raffle handler with a test submission")
        .arg(
            Arg::new("local")
                .long("local")
                .help("Records the entry in memory instead of AWS S3"),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("NAME")
                .help("Sets the entrant name [default: random]")
                .takes_value(true),
        )
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .value_name("EMAIL")
                .help("Sets the entrant email address [default: random]")
                .takes_value(true),
        )
        .arg(
            Arg::new("prize")
                .short('p')
                .long("prize")
                .value_name("PRIZE")
                .help("Sets the preferred prize [default: random]")
                .takes_value(true),
        )
}

pub async fn command(matches: &ArgMatches) -> Result<()> {
    let logger: Arc<dyn Log> = Arc::new(get_logging(matches)?);
    let request = test_request(
        matches.value_of("name"),
        matches.value_of("email"),
        matches.value_of("prize"),
    )?;
    let request_id = Uuid::new_v4().to_string();

    if matches.is_present("local") {
        let env = local_env(&ProcessEnvironment);
        let bucket = RaffleConfig::from_env(&env)?.bucket;
        let handler = EntryHandler::new(env, MemoryEntryStore::new(), logger);
        let response = handler.handle(request, &request_id).await;
        println!("{}", serde_json::to_string_pretty(&response)?);

        if let Some(ticket) = response.ticket() {
            let ticket: Ticket = ticket.parse()?;
            let stored = handler
                .store()
                .get(&bucket, &ticket.key())
                .await?
                .ok_or_else(|| anyhow!("entry {} was not recorded", ticket))?;
            let entry = Entry::from_slice(&stored)?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
    } else {
        let handler = EntryHandler::new(
            ProcessEnvironment,
            S3EntryStore::new(ProcessEnvironment)?,
            logger,
        );
        let response = handler.handle(request, &request_id).await;
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}

/// Builds the event the platform would deliver for a form submission. Fields
/// not given are filled with random letters.
pub fn test_request(
    name: Option<&str>,
    email: Option<&str>,
    prize: Option<&str>,
) -> Result<Request> {
    let submission = Submission {
        name:             Some(
            name.map(str::to_owned)
                .unwrap_or_else(|| format!("{} {}", random_string(), random_string())),
        ),
        email_address:    Some(
            email
                .map(str::to_owned)
                .unwrap_or_else(|| format!("{}@{}.com", random_string(), random_string())),
        ),
        first_preference: Some(prize.map(str::to_owned).unwrap_or_else(random_string)),
    };

    let mut headers = BTreeMap::new();
    headers.insert("X-Forwarded-For".to_string(), "1.2.3.4".to_string());
    headers.insert("User-Agent".to_string(), "boop-the-snoot".to_string());

    Ok(Request::new(&submission, &headers)?)
}

fn random_string() -> String {
    let mut rng = rand::thread_rng();
    (0..10)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

/// The process environment, with placeholders for whatever the configuration
/// guard would reject. Only the in-memory store may be used with it.
fn local_env<E: Environment>(env: &E) -> HashMap<String, String> {
    [
        (RAFFLE_BUCKET_VAR.as_str(), LOCAL_BUCKET),
        (RAFFLE_ACCESS_KEY_VAR.as_str(), LOCAL_CREDENTIAL),
        (RAFFLE_SECRET_KEY_VAR.as_str(), LOCAL_CREDENTIAL),
    ]
    .iter()
    .map(|(name, fallback)| {
        let value = env
            .var(name)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        (name.to_string(), value)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_fields() -> Result<()> {
        let submission = test_request(None, None, None)?.submission()?;
        let name = submission.name.unwrap_or_default();
        let email = submission.email_address.unwrap_or_default();

        assert_eq!(21, name.len());
        assert!(email.ends_with(".com"));
        assert_eq!(10, submission.first_preference.unwrap_or_default().len());
        assert!(name.chars().all(|c| c == ' ' || c.is_ascii_alphabetic()));
        Ok(())
    }

    #[test]
    fn given_fields_are_kept() -> Result<()> {
        let submission = test_request(Some("Ada"), Some("ada@example.com"), Some("Loom"))?
            .submission()?;
        assert_eq!(Some("Ada".to_string()), submission.name);
        assert_eq!(Some("Loom".to_string()), submission.first_preference);
        Ok(())
    }

    #[test]
    fn local_env_fills_gaps() {
        let mut process = HashMap::new();
        process.insert("bucket_name".to_string(), "my-bucket".to_string());
        process.insert("aws_access_key_id".to_string(), String::new());

        let env = local_env(&process);
        assert_eq!(Some("my-bucket".to_string()), env.var("bucket_name"));
        assert_eq!(Some("local".to_string()), env.var("aws_access_key_id"));
        assert_eq!(Some("local".to_string()), env.var("aws_secret_access_key"));
    }

    #[tokio::test]
    async fn local_invocation_records_an_entry() -> Result<()> {
        let matches = Command::new("t")
            .args(crate::args::get_logging_args())
            .get_matches_from(["t", "--silent"]);
        let env = local_env(&HashMap::<String, String>::new());
        let handler = EntryHandler::new(
            env,
            MemoryEntryStore::new(),
            Arc::new(get_logging(&matches)?),
        );

        let response = handler
            .handle(test_request(Some("Ada"), None, None)?, "cli-test")
            .await;

        assert_eq!(200, response.status_code);
        let ticket: Ticket = response.ticket().ok_or_else(|| anyhow!("no ticket"))?.parse()?;
        let stored = handler
            .store()
            .get(LOCAL_BUCKET, &ticket.key())
            .await?
            .ok_or_else(|| anyhow!("not recorded"))?;
        assert_eq!("Ada", Entry::from_slice(&stored)?.name);
        Ok(())
    }
}
