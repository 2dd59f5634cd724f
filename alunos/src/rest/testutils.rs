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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use alunos_core::db::Db;
use alunos_core::model::EmailAddress;
use axum::Router;
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The app router, without any account endpoints.
    app: Router,
}

impl TestContext {
    /// Initializes the app using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(alunos_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(Arc::new(driver), Router::new());
        Self { db, app }
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Closes the database so that any further access fails.
    pub(crate) async fn close_db(&self) {
        self.db.close().await;
    }

    /// Creates a student by directly modifying the backing database.
    pub(crate) async fn create_aluno(&self, nome: &'static str, idade: i32) -> Aluno {
        let new = NewAluno::new(Nome::from(nome), EmailAddress::from("someone@example.com"), idade);
        db::create_aluno(&mut self.db.ex().await.unwrap(), new).await.unwrap()
    }

    /// Gets the student identified by `id` by directly querying the backing database.
    pub(crate) async fn get_aluno(&self, id: AlunoId) -> Option<Aluno> {
        db::get_aluno(&mut self.db.ex().await.unwrap(), id).await.unwrap()
    }

    /// Gets all students by directly querying the backing database.
    pub(crate) async fn list_alunos(&self) -> Vec<Aluno> {
        db::list_alunos(&mut self.db.ex().await.unwrap()).await.unwrap()
    }
}
