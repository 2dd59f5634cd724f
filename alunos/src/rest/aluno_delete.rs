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

//! API to delete a student.

use crate::model::AlunoId;
use crate::rest::AlunosState;
use alunos_core::rest::{EmptyBody, RestError};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// API handler.
#[utoipa::path(
    delete,
    path = "/api/Alunos/{id}",
    operation_id = "DeleteAluno",
    tag = "Alunos",
    params(("id" = i64, Path, description = "Identifier of the student")),
    responses(
        (status = 200, description = "Confirmation message", body = String),
        (status = 404, description = "No student has the given identifier"),
    ),
)]
pub(super) async fn handler(
    State(alunos): State<AlunosState>,
    Path(id): Path<AlunoId>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    match alunos.delete(id).await? {
        Some(_) => Ok(Json(format!("Aluno de id={} foi excluido com sucesso", id))),
        None => Err(RestError::NotFound(format!("Aluno com id={} não encontrado", id))),
    }
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use alunos_core::rest::testutils::*;
    use axum::http;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::DELETE, format!("/api/Alunos/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let aluno = context.create_aluno("João", 20).await;
        let other = context.create_aluno("Maria", 22).await;

        let id = aluno.id().as_i64();
        let response = OneShotBuilder::new(context.app(), route(id))
            .send_empty()
            .await
            .expect_json::<String>()
            .await;
        assert_eq!(format!("Aluno de id={} foi excluido com sucesso", id), response);

        assert_eq!(None, context.get_aluno(*aluno.id()).await);
        assert_eq!(vec![other], context.list_alunos().await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        let aluno = context.create_aluno("João", 20).await;

        OneShotBuilder::new(context.app(), route(aluno.id().as_i64() + 1))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error(&format!("^Aluno com id={} não encontrado$", aluno.id().as_i64() + 1))
            .await;

        assert_eq!(vec![aluno], context.list_alunos().await);
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
