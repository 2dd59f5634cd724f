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

//! API to update an existing student.

use crate::model::{Aluno, AlunoId};
use crate::rest::AlunosState;
use alunos_core::rest::RestError;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// API handler.
#[utoipa::path(
    put,
    path = "/api/Alunos/{id}",
    operation_id = "EditAluno",
    tag = "Alunos",
    params(("id" = i64, Path, description = "Identifier of the student")),
    request_body = Aluno,
    responses(
        (status = 200, description = "Confirmation message", body = String),
        (status = 400, description = "The identifier in the body does not match the path"),
        (status = 404, description = "No student has the given identifier"),
    ),
)]
pub(super) async fn handler(
    State(alunos): State<AlunosState>,
    Path(id): Path<AlunoId>,
    Json(aluno): Json<Aluno>,
) -> Result<impl IntoResponse, RestError> {
    if *aluno.id() != id {
        return Err(RestError::InvalidRequest("Dados inconsistentes".to_owned()));
    }

    match alunos.update(aluno).await? {
        Some(_) => Ok(Json(format!("Aluno com id={} foi atualizado com sucesso", id))),
        None => Err(RestError::NotFound(format!("Aluno com id={} não encontrado", id))),
    }
}
