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

//! REST service to manage student records.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use alunos_authn::driver::{AuthnDriver, JwtOptions, TokenIssuer};
use alunos_core::clocks::{Clock, SystemClock};
use alunos_core::db::Db;
use alunos_core::env::get_optional_var;
use axum::Router;
use axum::http::HeaderValue;
use log::info;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;

/// Default port to listen on.
const DEFAULT_PORT: u16 = 5000;

/// Default origin allowed to issue cross-origin requests.
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Configuration options for the HTTP server.
#[derive(Debug, PartialEq)]
pub struct ServerOptions {
    /// Port to listen on.
    pub port: u16,

    /// Single origin allowed to issue cross-origin requests.
    pub cors_origin: String,
}

impl ServerOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_PORT` and `<prefix>_CORS_ORIGIN`, all of which
    /// are optional.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            cors_origin: get_optional_var::<String>(prefix, "CORS_ORIGIN")?
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_owned()),
        })
    }
}

/// Creates the router for the whole service, wiring the drivers to the database.
fn app(
    db: Arc<dyn Db + Send + Sync>,
    jwt_opts: JwtOptions,
    clock: Arc<dyn Clock + Send + Sync>,
    cors_origin: &str,
) -> Result<Router, String> {
    let origin = HeaderValue::from_str(cors_origin)
        .map_err(|e| format!("Invalid CORS origin '{}': {}", cors_origin, e))?;
    let cors = CorsLayer::new().allow_origin([origin]).allow_methods(Any).allow_headers(Any);

    let account = alunos_authn::rest::app(
        Arc::new(AuthnDriver::new(db.clone())),
        Arc::new(TokenIssuer::new(jwt_opts)),
        clock,
    );
    let driver = Driver::new(db);
    Ok(rest::app(Arc::new(driver), account).layer(cors))
}

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// The database behind `db` must have been initialized with the schemas of this crate and of the
/// `alunos-authn` crate.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    opts: ServerOptions,
    db: Arc<dyn Db + Send + Sync>,
    jwt_opts: JwtOptions,
) -> Result<(), Box<dyn Error>> {
    let app = app(db, jwt_opts, Arc::new(SystemClock::default()), &opts.cors_origin)?;

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
