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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::{Aluno, AlunoId, NewAluno, Nome};
use alunos_core::db::{DbError, DbResult, Executor};
#[cfg(feature = "postgres")]
use alunos_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use alunos_core::db::sqlite;
use alunos_core::model::EmailAddress;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Converts a `criterion` into a pattern for `LIKE` that matches it anywhere in a string.
///
/// The pattern uses `\` as the escape character so that wildcards in `criterion` are literals.
fn contains_pattern(criterion: &str) -> String {
    let mut pattern = String::with_capacity(criterion.len() + 2);
    pattern.push('%');
    for ch in criterion.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Checks that a write on a single row affected exactly one row.
fn expect_one_row(rows_affected: u64, op: &str) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError(format!("{} affected more than one row", op))),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Aluno {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let nome: String = row.try_get("nome").map_err(postgres::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let idade: i32 = row.try_get("idade").map_err(postgres::map_sqlx_error)?;

        Ok(Aluno::new(AlunoId::new(id), Nome::new(nome)?, EmailAddress::new(email)?, idade))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Aluno {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let nome: String = row.try_get("nome").map_err(sqlite::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let idade: i32 = row.try_get("idade").map_err(sqlite::map_sqlx_error)?;

        Ok(Aluno::new(AlunoId::new(id), Nome::new(nome)?, EmailAddress::new(email)?, idade))
    }
}

/// Gets all students sorted by their identifier.
pub(crate) async fn list_alunos(ex: &mut Executor) -> DbResult<Vec<Aluno>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, nome, email, idade FROM alunos ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Aluno::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, nome, email, idade FROM alunos ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Aluno::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all students whose name contains `criterion`, ignoring case, sorted by their identifier.
pub(crate) async fn find_alunos_by_nome(
    ex: &mut Executor,
    criterion: &str,
) -> DbResult<Vec<Aluno>> {
    let pattern = contains_pattern(criterion);

    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, nome, email, idade FROM alunos
                WHERE nome ILIKE $1 ESCAPE '\\'
                ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(pattern)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Aluno::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, nome, email, idade FROM alunos
                WHERE nome LIKE ? ESCAPE '\\'
                ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(pattern)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Aluno::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the student identified by `id`, or `None` if it does not exist.
pub(crate) async fn get_aluno(ex: &mut Executor, id: AlunoId) -> DbResult<Option<Aluno>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, nome, email, idade FROM alunos WHERE id = $1";
            let maybe_row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            maybe_row.map(Aluno::try_from).transpose()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, nome, email, idade FROM alunos WHERE id = ?";
            let maybe_row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            maybe_row.map(Aluno::try_from).transpose()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Stores a new student and returns it along with the identifier assigned to it.
pub(crate) async fn create_aluno(ex: &mut Executor, aluno: NewAluno) -> DbResult<Aluno> {
    let id: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "INSERT INTO alunos (nome, email, idade) VALUES ($1, $2, $3) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(aluno.nome().as_str())
                .bind(aluno.email().as_str())
                .bind(*aluno.idade())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO alunos (nome, email, idade) VALUES (?, ?, ?) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(aluno.nome().as_str())
                .bind(aluno.email().as_str())
                .bind(*aluno.idade())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("id").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(aluno.with_id(AlunoId::new(id)))
}

/// Replaces the details of the existing student `aluno`, matched by its identifier.
///
/// Fails with `DbError::NotFound` if there is no such student.
pub(crate) async fn update_aluno(ex: &mut Executor, aluno: &Aluno) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "UPDATE alunos SET nome = $1, email = $2, idade = $3 WHERE id = $4";
            let done = sqlx::query(query_str)
                .bind(aluno.nome().as_str())
                .bind(aluno.email().as_str())
                .bind(*aluno.idade())
                .bind(aluno.id().as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE alunos SET nome = ?, email = ?, idade = ? WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(aluno.nome().as_str())
                .bind(aluno.email().as_str())
                .bind(*aluno.idade())
                .bind(aluno.id().as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    expect_one_row(rows_affected, "Update")
}

/// Deletes the student identified by `id`.
///
/// Fails with `DbError::NotFound` if there is no such student.
pub(crate) async fn delete_aluno(ex: &mut Executor, id: AlunoId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM alunos WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM alunos WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    expect_one_row(rows_affected, "Deletion")
}
