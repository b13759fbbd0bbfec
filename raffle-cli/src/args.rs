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

use anyhow::Result;
use clap::{Arg, ArgMatches};
use log::LevelFilter;
use std::io::Write;

pub fn get_logging_args() -> Vec<Arg<'static>> {
    vec![
        Arg::new("log-level")
            .short('L')
            .long("log-level")
            .possible_values(["error", "warn", "info", "debug", "trace", "off"])
            .help("Log level [default: info]")
            .global(true)
            .takes_value(true),
        Arg::new("trace")
            .long("trace")
            .help("Log ultra-verbose (trace level) information")
            .global(true)
            .takes_value(false),
        Arg::new("silent")
            .long("silent")
            .help("Suppress all output")
            .global(true)
            .takes_value(false),
    ]
}

pub fn get_level(matches: &ArgMatches) -> LevelFilter {
    if matches.is_present("trace") {
        LevelFilter::Trace
    } else if matches.is_present("silent") {
        LevelFilter::Off
    } else {
        match matches.value_of("log-level") {
            Some("error") => LevelFilter::Error,
            Some("warn") => LevelFilter::Warn,
            Some("debug") => LevelFilter::Debug,
            Some("trace") => LevelFilter::Trace,
            Some("off") => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }
}

/// Builds the logger handed to the handler.
pub fn get_logging(matches: &ArgMatches) -> Result<env_logger::Logger> {
    let mut builder = env_logger::Builder::new();

    let level = get_level(matches);
    builder.filter(None, level);
    builder.filter_module("rusoto_core", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Warn);

    if level == LevelFilter::Trace {
        builder.format_timestamp_secs();
    } else {
        builder.format(|f, record| {
            writeln!(
                f,
                "[{}] {}",
                record.level().to_string().to_lowercase(),
                record.args()
            )
        });
    }

    Ok(builder.build())
}
