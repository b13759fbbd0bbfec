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

//! Pseudonymous caller identity.
//!
//! The identity is a SHA-512 digest of the forwarded IP address and the user
//! agent. It correlates submissions from the same caller without storing
//! either value; it is not a verified identity.

use crate::config::{RAFFLE_FORWARDED_FOR_HEADER, RAFFLE_USER_AGENT_HEADER};
use serde_json::{Map, Value};
use sha2::{Digest, Sha512};

/// How an absent header is rendered when only one of the two is present.
pub const ABSENT_HEADER: &str = "None";

/// Derives the identity token from the request headers.
///
/// `headers` is either a JSON-encoded string holding an object, or the object
/// itself. Missing or unparseable headers, or headers carrying neither the
/// forwarded IP nor the user agent, yield an empty string.
pub fn derive_identity(headers: Option<&Value>) -> String {
    match headers.and_then(header_map) {
        Some(map) => identity_from(
            header(&map, &RAFFLE_FORWARDED_FOR_HEADER),
            header(&map, &RAFFLE_USER_AGENT_HEADER),
        ),
        None => String::new(),
    }
}

/// Hashes `{ip}-{agent}` into a 128-character lowercase hex token.
pub fn identity_from(ip: Option<&str>, agent: Option<&str>) -> String {
    if ip.is_none() && agent.is_none() {
        return String::new();
    }
    let source = format!(
        "{}-{}",
        ip.unwrap_or(ABSENT_HEADER),
        agent.unwrap_or(ABSENT_HEADER)
    );
    hex::encode(Sha512::digest(source.as_bytes()))
}

fn header_map(headers: &Value) -> Option<Map<String, Value>> {
    match headers {
        Value::Object(map) => Some(map.clone()),
        Value::String(encoded) => match serde_json::from_str(encoded) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

/// Header names are matched exactly as configured; `x-forwarded-for` does not
/// match `X-Forwarded-For`.
fn header<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    map.get(name).and_then(Value::as_str)
}
