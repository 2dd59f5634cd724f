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

//! Business logic for the service.

use crate::model::{Aluno, AlunoId, NewAluno};
use alunos_core::db::Db;
use alunos_core::driver::DriverResult;
use async_trait::async_trait;
use std::sync::Arc;

mod aluno;
mod alunos;
#[cfg(test)]
pub(crate) mod testutils;

/// Operations on the set of students.
///
/// Lookups report missing students as `None` or as an empty collection and leave it to the
/// caller to decide how to describe the absence.
#[async_trait]
pub(crate) trait AlunoService {
    /// Gets all students sorted by their identifier.
    async fn list(&self) -> DriverResult<Vec<Aluno>>;

    /// Gets all students whose name contains `criterion`, ignoring case.  A blank `criterion`
    /// matches every student.
    async fn find_by_name(&self, criterion: &str) -> DriverResult<Vec<Aluno>>;

    /// Gets the student identified by `id`.
    async fn get(&self, id: AlunoId) -> DriverResult<Option<Aluno>>;

    /// Stores a new student and returns it with its newly-assigned identifier.
    async fn create(&self, aluno: NewAluno) -> DriverResult<Aluno>;

    /// Replaces the details of the student that has the same identifier as `aluno`.
    ///
    /// Returns the stored student, or `None` if there was no student to update.
    async fn update(&self, aluno: Aluno) -> DriverResult<Option<Aluno>>;

    /// Deletes the student identified by `id`.
    ///
    /// Returns the student that was deleted, or `None` if it did not exist.
    async fn delete(&self, id: AlunoId) -> DriverResult<Option<Aluno>>;
}

/// Business logic backed by a database.
///
/// Every operation runs to completion against the database on its own, within a transaction
/// when it needs more than one statement.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlunoService for Driver {
    async fn list(&self) -> DriverResult<Vec<Aluno>> {
        self.list_alunos().await
    }

    async fn find_by_name(&self, criterion: &str) -> DriverResult<Vec<Aluno>> {
        self.find_alunos_by_nome(criterion).await
    }

    async fn get(&self, id: AlunoId) -> DriverResult<Option<Aluno>> {
        self.get_aluno(id).await
    }

    async fn create(&self, aluno: NewAluno) -> DriverResult<Aluno> {
        self.create_aluno(aluno).await
    }

    async fn update(&self, aluno: Aluno) -> DriverResult<Option<Aluno>> {
        self.update_aluno(aluno).await
    }

    async fn delete(&self, id: AlunoId) -> DriverResult<Option<Aluno>> {
        self.delete_aluno(id).await
    }
}
