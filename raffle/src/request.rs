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

//! The invocation event and the response returned to the platform.

use crate::config::{RAFFLE_POWERED_BY, RAFFLE_RESPONSE_CONTENT_TYPE};
use crate::error::Result;
use crate::ticket::Ticket;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The event delivered by the platform.
///
/// Only `body` and `headers` are read. Any other field of the event, such as
/// the request context, is ignored.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// The form submission, JSON-encoded.
    #[serde(default)]
    pub body:    Option<String>,
    /// The request headers, JSON-encoded as a string or already decoded.
    #[serde(default)]
    pub headers: Option<Value>,
}

impl Request {
    /// Builds a request from a submission and a header map.
    pub fn new(submission: &Submission, headers: &BTreeMap<String, String>) -> Result<Self> {
        Ok(Request {
            body:    Some(serde_json::to_string(submission)?),
            headers: Some(Value::String(serde_json::to_string(headers)?)),
        })
    }

    /// Parses the body. A request without a body is an empty submission.
    pub fn submission(&self) -> Result<Submission> {
        match self.body.as_deref() {
            Some(body) => Ok(serde_json::from_str(body)?),
            None => Ok(Submission::default()),
        }
    }
}

/// The submitted form fields, before sanitization.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// The entrant's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name:             Option<String>,
    /// The entrant's email address.
    #[serde(rename = "email-address", default, skip_serializing_if = "Option::is_none")]
    pub email_address:    Option<String>,
    /// The preferred prize.
    #[serde(rename = "first-preference", default, skip_serializing_if = "Option::is_none")]
    pub first_preference: Option<String>,
}

/// The body of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketBody {
    /// The ticket the entry was recorded under.
    pub id: String,
}

/// A Lambda proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The HTTP status code.
    pub status_code: u16,
    /// Present only on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body:        Option<TicketBody>,
    /// Present only on success.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers:     BTreeMap<String, String>,
}

impl Response {
    /// A `200` carrying the ticket id.
    pub fn recorded(ticket: &Ticket) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Content-Type".to_string(),
            RAFFLE_RESPONSE_CONTENT_TYPE.to_string(),
        );
        headers.insert("x-powered-by".to_string(), RAFFLE_POWERED_BY.to_string());
        Response {
            status_code: 200,
            body: Some(TicketBody {
                id: ticket.to_string(),
            }),
            headers,
        }
    }

    /// A response with a status code and nothing else.
    pub fn status(status_code: u16) -> Self {
        Response {
            status_code,
            body: None,
            headers: BTreeMap::new(),
        }
    }

    /// The ticket id of a successful response.
    pub fn ticket(&self) -> Option<&str> {
        self.body.as_ref().map(|body| body.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_the_proxy_event() -> Result<()> {
        let request: Request = serde_json::from_value(json!({
            "body": "{\"name\": \"Ada\", \"email-address\": \"ada@example.com\", \"first-preference\": \"Loom\"}",
            "headers": "{\"User-Agent\": \"curl/7.79\"}",
            "requestContext": { "requestId": "abc" }
        }))?;
        let submission = request.submission()?;
        assert_eq!(Some("Ada".to_string()), submission.name);
        assert_eq!(Some("ada@example.com".to_string()), submission.email_address);
        assert_eq!(Some("Loom".to_string()), submission.first_preference);
        Ok(())
    }

    #[test]
    fn missing_body_is_an_empty_submission() -> Result<()> {
        let request: Request = serde_json::from_value(json!({}))?;
        assert_eq!(Submission::default(), request.submission()?);
        Ok(())
    }

    #[test]
    fn rejects_malformed_bodies() {
        for body in ["not json", "[1, 2, 3]", "{\"name\": 42}"] {
            let request = Request {
                body:    Some(body.to_string()),
                headers: None,
            };
            assert!(request.submission().is_err(), "{}", body);
        }
    }

    #[test]
    fn response_shapes() -> Result<()> {
        let ticket: Ticket = "0f0e0d0c-0b0a-4908-8706-050403020100".parse()?;
        assert_eq!(
            json!({
                "statusCode": 200,
                "body": { "id": "0f0e0d0c-0b0a-4908-8706-050403020100" },
                "headers": {
                    "Content-Type": "application/json",
                    "x-powered-by": "al.paca"
                }
            }),
            serde_json::to_value(Response::recorded(&ticket))?
        );
        assert_eq!(
            json!({ "statusCode": 400 }),
            serde_json::to_value(Response::status(400))?
        );
        Ok(())
    }

    #[test]
    fn round_trips_through_new() -> Result<()> {
        let submission = Submission {
            name:             Some("Ada".to_string()),
            email_address:    Some("ada@example.com".to_string()),
            first_preference: None,
        };
        let mut headers = BTreeMap::new();
        headers.insert("X-Forwarded-For".to_string(), "1.2.3.4".to_string());
        let request = Request::new(&submission, &headers)?;
        assert_eq!(submission, request.submission()?);
        Ok(())
    }
}
