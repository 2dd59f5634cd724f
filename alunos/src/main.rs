// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Entry point to the student records service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use alunos_api::{ServerOptions, serve};
use alunos_authn::driver::JwtOptions;
use alunos_core::db::Db;
use alunos_core::db::postgres::{PostgresDb, PostgresOptions};
use log::error;
use std::error::Error;
use std::net::Ipv4Addr;
use std::process;
use std::sync::Arc;

/// Reads the configuration from the environment, prepares the database and serves requests until
/// the server terminates.
async fn run() -> Result<(), Box<dyn Error>> {
    let server_opts = ServerOptions::from_env("ALUNOS")?;
    let jwt_opts = JwtOptions::from_env("ALUNOS_JWT")?;
    let db_opts = PostgresOptions::from_env("ALUNOS_PGSQL")?;

    let db = Arc::new(PostgresDb::connect(db_opts)?);
    alunos_api::db::init_schema(&mut db.ex().await?).await?;
    alunos_authn::db::init_schema(&mut db.ex().await?).await?;

    let addr = (Ipv4Addr::LOCALHOST, server_opts.port);
    serve(addr, server_opts, db, jwt_opts).await
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{}", e);
        process::exit(1);
    }
}
