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

//! API to get one student.

use crate::model::{Aluno, AlunoId};
use crate::rest::AlunosState;
use alunos_core::rest::{EmptyBody, RestError};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// API handler.
#[utoipa::path(
    get,
    path = "/api/Alunos/{id}",
    operation_id = "GetAluno",
    tag = "Alunos",
    params(("id" = i64, Path, description = "Identifier of the student")),
    responses(
        (status = 200, description = "The student", body = Aluno),
        (status = 404, description = "No student has the given identifier"),
    ),
)]
pub(super) async fn handler(
    State(alunos): State<AlunosState>,
    Path(id): Path<AlunoId>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    match alunos.get(id).await? {
        Some(aluno) => Ok(Json(aluno)),
        None => Err(RestError::NotFound(format!("Não existe aluno com id={}", id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use alunos_core::rest::testutils::*;
    use axum::http;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::GET, format!("/api/Alunos/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        context.create_aluno("João", 20).await;
        let aluno = context.create_aluno("Maria", 22).await;

        let response = OneShotBuilder::new(context.app(), route(aluno.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<Aluno>()
            .await;
        assert_eq!(aluno, response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(42))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Não existe aluno com id=42$")
            .await;
    }

    #[tokio::test]
    async fn test_bad_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::GET, "/api/Alunos/abc"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_text("Invalid URL")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
