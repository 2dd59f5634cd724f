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

//! API to search for students by name.

use crate::model::Aluno;
use crate::rest::AlunosState;
use alunos_core::rest::{EmptyBody, RestError};
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

/// Query parameters of the search.
#[derive(Deserialize, utoipa::IntoParams)]
#[cfg_attr(test, derive(Serialize))]
#[into_params(parameter_in = Query)]
pub(crate) struct NomeQuery {
    /// Text to look for in the names of the students, ignoring case.
    #[serde(default)]
    nome: String,
}

/// API handler.
#[utoipa::path(
    get,
    path = "/api/Alunos/AlunoPorNome",
    operation_id = "GetAlunosByName",
    tag = "Alunos",
    params(NomeQuery),
    responses(
        (status = 200, description = "Matching students sorted by identifier", body = Vec<Aluno>),
        (status = 404, description = "No student matches the criterion"),
    ),
)]
pub(super) async fn handler(
    State(alunos): State<AlunosState>,
    Query(query): Query<NomeQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let found = alunos.find_by_name(&query.nome).await?;
    if found.is_empty() {
        return Err(RestError::NotFound(format!(
            "Não existem alunos com o critério {}",
            query.nome
        )));
    }

    Ok(Json(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use alunos_core::rest::testutils::*;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/Alunos/AlunoPorNome".to_owned())
    }

    fn query(nome: &str) -> NomeQuery {
        NomeQuery { nome: nome.to_owned() }
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let aluno1 = context.create_aluno("Maria Silva", 20).await;
        context.create_aluno("João", 21).await;
        let aluno3 = context.create_aluno("Ana Maria", 22).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query(query("maria"))
            .send_empty()
            .await
            .expect_json::<Vec<Aluno>>()
            .await;
        assert_eq!(vec![aluno1, aluno3], response);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        context.create_aluno("Maria", 20).await;

        OneShotBuilder::new(context.into_app(), route())
            .with_query(query("Inexistente"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Não existem alunos com o critério Inexistente$")
            .await;
    }

    #[tokio::test]
    async fn test_missing_criterion_matches_all() {
        let context = TestContext::setup().await;

        let aluno1 = context.create_aluno("Maria", 20).await;
        let aluno2 = context.create_aluno("João", 21).await;

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Aluno>>()
            .await;
        assert_eq!(vec![aluno1, aluno2], response);
    }

    #[tokio::test]
    async fn test_missing_criterion_without_students() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Não existem alunos com o critério $")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(),
        query("irrelevant")
    );
}
