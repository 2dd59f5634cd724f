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

//! High-level data types.

use alunos_core::model::{EmailAddress, ModelError, ModelResult};
use derive_getters::Getters;
use derive_more::{Constructor, Display};
use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum number of characters in a student's name.
const MAX_NOME_LENGTH: usize = 80;

/// Identifier of a student, assigned by the database on creation.
#[derive(
    Clone, Constructor, Copy, Debug, Deserialize, Display, Eq, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub(crate) struct AlunoId(i64);

impl AlunoId {
    /// Returns the identifier as an `i64` for database queries.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

/// Name of a student.  Cannot be blank.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Nome(String);

impl Nome {
    /// Creates a new name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.trim().is_empty() {
            return Err(ModelError("Name cannot be empty".to_owned()));
        }
        if s.chars().count() > MAX_NOME_LENGTH {
            return Err(ModelError(format!(
                "Name cannot be longer than {} characters",
                MAX_NOME_LENGTH
            )));
        }

        Ok(Self(s))
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
impl From<&str> for Nome {
    fn from(raw: &str) -> Self {
        Self::new(raw).expect("Hardcoded names for testing must be valid")
    }
}

/// Visitor to deserialize a `Nome` from a string.
struct NomeVisitor;

impl Visitor<'_> for NomeVisitor {
    type Value = Nome;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a student name")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Nome::new(v).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Nome::new(v).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for Nome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(NomeVisitor)
    }
}

/// Details of a student that does not exist yet.
///
/// Clients may send an `id` along with these fields but it is ignored: identifiers are always
/// assigned by the database.
#[derive(Constructor, Debug, Deserialize, Getters, ToSchema)]
#[cfg_attr(test, derive(PartialEq, Serialize))]
pub(crate) struct NewAluno {
    /// Name of the student.
    #[schema(value_type = String, max_length = 80)]
    nome: Nome,

    /// Contact email of the student.
    #[schema(value_type = String, max_length = 100)]
    email: EmailAddress,

    /// Age of the student.
    #[serde(default)]
    idade: i32,
}

impl NewAluno {
    /// Attaches the identifier assigned by the database to these details.
    pub(crate) fn with_id(self, id: AlunoId) -> Aluno {
        Aluno { id, nome: self.nome, email: self.email, idade: self.idade }
    }
}

/// A student as stored in the database.
#[derive(Constructor, Debug, Deserialize, Getters, Serialize, ToSchema)]
#[cfg_attr(test, derive(Clone, PartialEq))]
pub(crate) struct Aluno {
    /// Identifier of the student.
    #[schema(value_type = i64)]
    id: AlunoId,

    /// Name of the student.
    #[schema(value_type = String, max_length = 80)]
    nome: Nome,

    /// Contact email of the student.
    #[schema(value_type = String, max_length = 100)]
    email: EmailAddress,

    /// Age of the student.
    #[serde(default)]
    idade: i32,
}
