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

//! API to obtain a bearer token for an existing user.

use crate::model::{Password, UserToken};
use crate::rest::AccountState;
use alunos_core::model::EmailAddress;
use alunos_core::rest::RestError;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use log::debug;
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;
use utoipa::ToSchema;

/// Message sent to the server to log in.
#[derive(Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct LoginRequest {
    /// Email address the user registered with.
    #[schema(value_type = String)]
    pub email: EmailAddress,

    /// Password of the user.
    #[schema(value_type = String)]
    pub password: Password,
}

/// POST handler for this API.
#[utoipa::path(
    post,
    path = "/LoginUser",
    operation_id = "LoginUser",
    tag = "Account",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = UserToken),
        (status = 401, description = "Invalid credentials"),
    ),
)]
pub(super) async fn handler(
    State(state): State<AccountState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, RestError> {
    if !state.authn.authenticate(request.email.clone(), request.password).await? {
        debug!("Rejecting login for {}", request.email.as_str());
        return Err(RestError::Unauthorized("Login Inválido".to_owned()));
    }

    let token = state.issuer.issue(&request.email, state.clock.now_utc())?;
    Ok(Json(token))
}
