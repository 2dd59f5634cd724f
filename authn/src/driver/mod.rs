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

//! Business logic for user authentication.

use crate::model::{Password, User};
use alunos_core::db::Db;
use alunos_core::driver::DriverResult;
use alunos_core::model::EmailAddress;
use async_trait::async_trait;
use derivative::Derivative;
use std::sync::Arc;

mod login;
mod register;
#[cfg(test)]
pub(crate) mod testutils;
mod token;
pub use token::{JwtOptions, TokenIssuer};

/// Operations against the identity store.
#[async_trait]
pub trait Authenticate {
    /// Checks if `password` is the password of the user identified by `email`.
    ///
    /// Unknown users and wrong passwords are not errors: both yield `false`.
    async fn authenticate(&self, email: EmailAddress, password: Password) -> DriverResult<bool>;

    /// Creates a new account for the user identified by `email` with `password`.
    ///
    /// The password must be sufficiently complex.
    async fn register_user(&self, email: EmailAddress, password: Password) -> DriverResult<User>;
}

/// Business logic backed by the `users` table of a database.
///
/// The public operations exposed by the driver are all "one shot": every call completes an
/// operation against the database on its own.
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub struct AuthnDriver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl AuthnDriver {
    /// Creates a new driver backed by the given database.
    pub fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Authenticate for AuthnDriver {
    async fn authenticate(&self, email: EmailAddress, password: Password) -> DriverResult<bool> {
        self.login(email, password).await
    }

    async fn register_user(&self, email: EmailAddress, password: Password) -> DriverResult<User> {
        self.register(email, password).await
    }
}
