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

//! The main entry point for the raffle entry lambda function.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::Log;
use raffle::prelude::{EntryHandler, ProcessEnvironment, Request, Response, S3EntryStore};
use std::sync::Arc;

#[cfg(feature = "snmalloc")]
#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Builds the logger handed to the handler. The filter comes from `RUST_LOG`
/// and defaults to `info`.
fn logger() -> Arc<dyn Log> {
    Arc::new(
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp_millis()
            .build(),
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let store = S3EntryStore::new(ProcessEnvironment)?;
    let handler = EntryHandler::new(ProcessEnvironment, store, logger());
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Request>| async move {
        let LambdaEvent { payload, context } = event;
        Ok::<Response, Error>(handler.handle(payload, &context.request_id).await)
    }))
    .await?;
    Ok(())
}
