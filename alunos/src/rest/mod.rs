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

//! Entry point to the REST server.

use crate::driver::AlunoService;
use axum::Router;
use std::sync::Arc;

mod aluno_delete;
mod aluno_get;
mod aluno_post;
mod aluno_put;
mod alunos_get;
mod alunos_por_nome_get;
mod openapi_get;
#[cfg(test)]
mod testutils;

/// State shared by the handlers of the student endpoints.
type AlunosState = Arc<dyn AlunoService + Send + Sync>;

/// OpenAPI description of the whole service.
#[derive(utoipa::OpenApi)]
#[openapi(
    info(title = "AlunosApi", version = "v1"),
    paths(
        alunos_get::handler,
        alunos_por_nome_get::handler,
        aluno_get::handler,
        aluno_post::handler,
        aluno_put::handler,
        aluno_delete::handler,
    ),
    nest((path = "/api/Account", api = alunos_authn::rest::AccountApi)),
)]
struct ApiDoc;

/// Creates the router for the application.
///
/// The `account` router serves the account endpoints and is nested under `/api/Account`.
pub(crate) fn app(alunos: Arc<dyn AlunoService + Send + Sync>, account: Router) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/Alunos", get(alunos_get::handler).post(aluno_post::handler))
        .route("/api/Alunos/AlunoPorNome", get(alunos_por_nome_get::handler))
        .route(
            "/api/Alunos/:id",
            get(aluno_get::handler).put(aluno_put::handler).delete(aluno_delete::handler),
        )
        .with_state(alunos)
        .nest("/api/Account", account)
        .route("/swagger/v1/swagger.json", get(openapi_get::handler))
}
