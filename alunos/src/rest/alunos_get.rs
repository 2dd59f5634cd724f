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

//! API to get all existing students.

use crate::model::Aluno;
use crate::rest::AlunosState;
use alunos_core::rest::{EmptyBody, RestError};
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

/// API handler.
#[utoipa::path(
    get,
    path = "/api/Alunos",
    operation_id = "GetAlunos",
    tag = "Alunos",
    responses(
        (status = 200, description = "All students sorted by identifier", body = Vec<Aluno>),
    ),
)]
pub(super) async fn handler(
    State(alunos): State<AlunosState>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let alunos = alunos.list().await?;

    Ok(Json(alunos))
}
