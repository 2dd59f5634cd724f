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

//! API to register a new user.

use crate::model::Password;
use crate::rest::AccountState;
use alunos_core::model::EmailAddress;
use alunos_core::rest::RestError;
use axum::Json;
use axum::extract::State;
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;
use utoipa::ToSchema;

/// Message sent to the server to create a user.
#[derive(Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Email address that identifies the new user.
    #[schema(value_type = String)]
    pub email: EmailAddress,

    /// Desired password.
    #[schema(value_type = String)]
    pub password: Password,

    /// Repetition of `password` to catch typos.
    #[schema(value_type = String)]
    pub confirm_password: Password,
}

/// POST handler for this API.
#[utoipa::path(
    post,
    path = "/CreateUser",
    operation_id = "CreateUser",
    tag = "Account",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = String),
        (status = 400, description = "Invalid or duplicate registration"),
    ),
)]
pub(super) async fn handler(
    State(state): State<AccountState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<String>, RestError> {
    if request.password != request.confirm_password {
        return Err(RestError::InvalidRequest("As senhas não conferem".to_owned()));
    }

    let user = state.authn.register_user(request.email, request.password).await?;
    Ok(Json(format!("Usuário {} criado com sucesso", user.email().as_str())))
}
