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

mod args;
mod entry;
mod invoke;

use anyhow::Result;
use clap::{crate_version, Command};

#[tokio::main]
pub async fn main() -> Result<()> {
    // Command line arg parsing and configuration.
    let matches = Command::new("Raffle")
        .version(crate_version!())
        .about("Command Line Tool for the raffle entry function")
        .author("UMD Database Group")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .args(args::get_logging_args())
        .subcommand(invoke::command_args())
        .subcommand(entry::command_args())
        .get_matches();

    match matches.subcommand() {
        Some(("invoke", invoke_matches)) => invoke::command(invoke_matches).await,
        Some(("entry", entry_matches)) => entry::command(entry_matches).await,
        _ => Ok(()),
    }
}
