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

//! Raffle error types

use crate::store::StoreError;

use std::error;
use std::fmt::{Display, Formatter};
use std::result;

/// Result type for operations that could result in an [RaffleError]
pub type Result<T> = result::Result<T, RaffleError>;

/// Raffle error
#[derive(Debug)]
pub enum RaffleError {
    /// A required configuration value is missing or empty. Carries the name of
    /// the environment variable.
    Configuration(String),
    /// The submission is malformed, or one of its fields is missing, empty or
    /// cannot be sanitized.
    Validation(String),
    /// The entry store refused or failed the write of a ticket.
    Storage {
        /// The ticket whose write failed. It is never reused.
        ticket: String,
        /// What the store reported.
        source: StoreError,
    },
    /// Error returned when serde_json failed to serialize or deserialize data.
    SerdeJson(serde_json::Error),
    /// Error returned when setting up the AWS clients fails.
    AWS(String),
    /// Error returned as a consequence of an error in Raffle. This error
    /// should not happen in normal usage.
    Internal(String),
}

impl RaffleError {
    /// The HTTP status code reported to the caller for this error.
    ///
    /// A failed write is reported as `400`, the same as a rejected submission.
    pub fn status_code(&self) -> u16 {
        match self {
            RaffleError::Configuration(_) | RaffleError::AWS(_) | RaffleError::Internal(_) => 500,
            RaffleError::Validation(_)
            | RaffleError::Storage { .. }
            | RaffleError::SerdeJson(_) => 400,
        }
    }
}

impl From<serde_json::Error> for RaffleError {
    fn from(e: serde_json::Error) -> Self {
        RaffleError::SerdeJson(e)
    }
}

impl From<&str> for RaffleError {
    fn from(e: &str) -> Self {
        RaffleError::Internal(e.to_string())
    }
}

impl Display for RaffleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            RaffleError::Configuration(ref name) => write!(f, "{} is not set", name),
            RaffleError::Validation(ref desc) => write!(f, "Invalid submission: {}", desc),
            RaffleError::Storage {
                ref ticket,
                ref source,
            } => write!(f, "failed to write entry {}: {}", ticket, source),
            RaffleError::SerdeJson(ref desc) => write!(f, "serde_json error: {}", desc),
            RaffleError::AWS(ref desc) => write!(f, "AWS error: {}", desc),
            RaffleError::Internal(ref desc) => write!(f, "Internal error: {}", desc),
        }
    }
}

impl error::Error for RaffleError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            RaffleError::Storage { source, .. } => Some(source),
            RaffleError::SerdeJson(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            500,
            RaffleError::Configuration("bucket_name".to_string()).status_code()
        );
        assert_eq!(400, RaffleError::Validation("name".to_string()).status_code());
        assert_eq!(
            400,
            RaffleError::Storage {
                ticket: "t".to_string(),
                source: StoreError::Transient("timeout".to_string()),
            }
            .status_code()
        );
    }

    #[test]
    fn storage_error_names_ticket() {
        let err = RaffleError::Storage {
            ticket: "0b9e".to_string(),
            source: StoreError::PermissionDenied("Access Denied".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("0b9e"));
        assert!(message.contains("Access Denied"));
        assert!(error::Error::source(&err).is_some());
    }
}
