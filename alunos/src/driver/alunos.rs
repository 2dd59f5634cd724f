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

//! Operations on the collection of students.

use crate::db;
use crate::driver::Driver;
use crate::model::Aluno;
use alunos_core::driver::DriverResult;

impl Driver {
    /// Gets all students sorted by their identifier.
    pub(super) async fn list_alunos(&self) -> DriverResult<Vec<Aluno>> {
        let alunos = db::list_alunos(&mut self.db.ex().await?).await?;
        Ok(alunos)
    }

    /// Gets all students whose name contains `criterion`.
    pub(super) async fn find_alunos_by_nome(&self, criterion: &str) -> DriverResult<Vec<Aluno>> {
        let mut ex = self.db.ex().await?;
        let alunos = if criterion.trim().is_empty() {
            db::list_alunos(&mut ex).await?
        } else {
            db::find_alunos_by_nome(&mut ex, criterion).await?
        };
        Ok(alunos)
    }
}
