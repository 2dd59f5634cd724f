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

//! API to create a new student.

use crate::model::{Aluno, NewAluno};
use crate::rest::AlunosState;
use alunos_core::rest::RestError;
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

/// API handler.
#[utoipa::path(
    post,
    path = "/api/Alunos",
    operation_id = "CreateAluno",
    tag = "Alunos",
    request_body = NewAluno,
    responses(
        (status = 201, description = "The stored student", body = Aluno,
            headers(("Location" = String, description = "Path to get the new student"))),
        (status = 422, description = "Invalid student details"),
    ),
)]
pub(super) async fn handler(
    State(alunos): State<AlunosState>,
    Json(aluno): Json<NewAluno>,
) -> Result<impl IntoResponse, RestError> {
    let aluno = alunos.create(aluno).await?;
    let location = format!("/api/Alunos/{}", aluno.id());

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(aluno)))
}
