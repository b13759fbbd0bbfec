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

//! Configuration settings that affect all crates in current system.

use ini::Ini;
use lazy_static::lazy_static;

lazy_static! {
    /// Global settings.
    pub static ref RAFFLE_CONF: Ini = Ini::load_from_str(include_str!("./config.toml")).unwrap();

    /// Environment variable holding the destination bucket.
    pub static ref RAFFLE_BUCKET_VAR: String = RAFFLE_CONF["env"]["bucket_name"].to_string();
    /// Environment variable holding the AWS access key id.
    pub static ref RAFFLE_ACCESS_KEY_VAR: String = RAFFLE_CONF["env"]["access_key_id"].to_string();
    /// Environment variable holding the AWS secret access key.
    pub static ref RAFFLE_SECRET_KEY_VAR: String = RAFFLE_CONF["env"]["secret_access_key"].to_string();
    /// Environment variable holding an optional AWS session token.
    pub static ref RAFFLE_SESSION_TOKEN_VAR: String = RAFFLE_CONF["env"]["session_token"].to_string();

    /// Key prefix of every stored entry.
    pub static ref RAFFLE_ENTRY_PREFIX: String = RAFFLE_CONF["entry"]["key_prefix"].to_string();
    /// Content type of the stored entry objects.
    pub static ref RAFFLE_ENTRY_CONTENT_TYPE: String = RAFFLE_CONF["entry"]["content_type"].to_string();
    /// Minimum length of a sanitized field.
    pub static ref RAFFLE_MIN_FIELD_LENGTH: usize = RAFFLE_CONF["entry"]["min_length"].parse::<usize>().unwrap();
    /// Maximum length of a raw field.
    pub static ref RAFFLE_MAX_FIELD_LENGTH: usize = RAFFLE_CONF["entry"]["max_length"].parse::<usize>().unwrap();

    /// Header carrying the caller's forwarded IP address.
    pub static ref RAFFLE_FORWARDED_FOR_HEADER: String = RAFFLE_CONF["headers"]["forwarded_for"].to_string();
    /// Header carrying the caller's user agent.
    pub static ref RAFFLE_USER_AGENT_HEADER: String = RAFFLE_CONF["headers"]["user_agent"].to_string();

    /// `Content-Type` of a successful response.
    pub static ref RAFFLE_RESPONSE_CONTENT_TYPE: String = RAFFLE_CONF["response"]["content_type"].to_string();
    /// `x-powered-by` of a successful response.
    pub static ref RAFFLE_POWERED_BY: String = RAFFLE_CONF["response"]["powered_by"].to_string();
}
