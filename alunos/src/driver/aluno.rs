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

//! Operations on one student.

use crate::db;
use crate::driver::Driver;
use crate::model::{Aluno, AlunoId, NewAluno};
use alunos_core::db::DbError;
use alunos_core::driver::DriverResult;
use log::info;

impl Driver {
    /// Gets the student identified by `id`.
    pub(super) async fn get_aluno(&self, id: AlunoId) -> DriverResult<Option<Aluno>> {
        let aluno = db::get_aluno(&mut self.db.ex().await?, id).await?;
        Ok(aluno)
    }

    /// Stores a new student.
    pub(super) async fn create_aluno(&self, aluno: NewAluno) -> DriverResult<Aluno> {
        let mut tx = self.db.begin().await?;
        let aluno = db::create_aluno(tx.ex(), aluno).await?;
        tx.commit().await?;
        info!("Created student {}", aluno.id());
        Ok(aluno)
    }

    /// Replaces the details of an existing student.
    pub(super) async fn update_aluno(&self, aluno: Aluno) -> DriverResult<Option<Aluno>> {
        let mut tx = self.db.begin().await?;
        match db::update_aluno(tx.ex(), &aluno).await {
            Ok(()) => (),
            Err(DbError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        info!("Updated student {}", aluno.id());
        Ok(Some(aluno))
    }

    /// Deletes an existing student.
    pub(super) async fn delete_aluno(&self, id: AlunoId) -> DriverResult<Option<Aluno>> {
        let mut tx = self.db.begin().await?;
        let Some(aluno) = db::get_aluno(tx.ex(), id).await? else {
            return Ok(None);
        };
        db::delete_aluno(tx.ex(), id).await?;
        tx.commit().await?;
        info!("Deleted student {}", id);
        Ok(Some(aluno))
    }
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::driver::AlunoService;
    use crate::driver::testutils::*;
    use crate::model::*;
    use alunos_core::model::EmailAddress;

    #[tokio::test]
    async fn test_get_ok() {
        let context = TestContext::setup().await;

        let aluno = context.create_aluno("João", 20).await;

        assert_eq!(Some(aluno.clone()), context.driver().get(*aluno.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(None, context.driver().get(AlunoId::new(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let context = TestContext::setup().await;

        let new = NewAluno::new(Nome::from("Maria"), EmailAddress::from("maria@example.com"), 22);
        let aluno = context.driver().create(new).await.unwrap();
        assert_eq!("Maria", aluno.nome().as_str());
        assert_eq!("maria@example.com", aluno.email().as_str());
        assert_eq!(22, *aluno.idade());

        let stored = db::get_aluno(&mut context.ex().await, *aluno.id()).await.unwrap();
        assert_eq!(Some(aluno), stored);
    }

    #[tokio::test]
    async fn test_update_ok() {
        let context = TestContext::setup().await;

        let aluno = context.create_aluno("João", 20).await;
        let updated = Aluno::new(
            *aluno.id(),
            Nome::from("João Atualizado"),
            EmailAddress::from("joao@example.com"),
            21,
        );

        assert_eq!(
            Some(updated.clone()),
            context.driver().update(updated.clone()).await.unwrap()
        );

        let stored = db::get_aluno(&mut context.ex().await, *aluno.id()).await.unwrap();
        assert_eq!(Some(updated), stored);
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let context = TestContext::setup().await;

        let aluno = Aluno::new(AlunoId::new(8), Nome::from("João"), "joao@example.com".into(), 20);
        assert_eq!(None, context.driver().update(aluno).await.unwrap());

        assert!(db::list_alunos(&mut context.ex().await).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_ok() {
        let context = TestContext::setup().await;

        let aluno1 = context.create_aluno("João", 20).await;
        let aluno2 = context.create_aluno("Maria", 22).await;

        assert_eq!(Some(aluno1.clone()), context.driver().delete(*aluno1.id()).await.unwrap());

        assert_eq!(vec![aluno2], db::list_alunos(&mut context.ex().await).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let context = TestContext::setup().await;

        let aluno = context.create_aluno("João", 20).await;

        let missing = AlunoId::new(aluno.id().as_i64() + 1);
        assert_eq!(None, context.driver().delete(missing).await.unwrap());

        assert_eq!(vec![aluno], db::list_alunos(&mut context.ex().await).await.unwrap());
    }
}
