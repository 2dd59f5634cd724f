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

//! REST interface for the account endpoints.

use crate::driver::{Authenticate, TokenIssuer};
use alunos_core::clocks::Clock;
use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;

mod account_create_user_post;
mod account_login_post;
#[cfg(test)]
mod testutils;

pub use account_create_user_post::CreateUserRequest;
pub use account_login_post::LoginRequest;

/// Shared state of the account handlers.
#[derive(Clone)]
struct AccountState {
    /// Checks credentials and creates users.
    authn: Arc<dyn Authenticate + Send + Sync>,

    /// Mints tokens for users that log in successfully.
    issuer: Arc<TokenIssuer>,

    /// Source of the issue time of new tokens.
    clock: Arc<dyn Clock + Send + Sync>,
}

/// OpenAPI description of the account endpoints, relative to where `app` is mounted.
#[derive(OpenApi)]
#[openapi(paths(account_login_post::handler, account_create_user_post::handler))]
pub struct AccountApi;

/// Creates the router for the account endpoints.
///
/// The returned router is meant to be nested under a prefix such as `/api/Account`.
pub fn app(
    authn: Arc<dyn Authenticate + Send + Sync>,
    issuer: Arc<TokenIssuer>,
    clock: Arc<dyn Clock + Send + Sync>,
) -> Router {
    use axum::routing::post;

    let state = AccountState { authn, issuer, clock };
    Router::new()
        .route("/CreateUser", post(account_create_user_post::handler))
        .route("/LoginUser", post(account_login_post::handler))
        .with_state(state)
}
