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

//! Utilities to help testing services that integrate with the `authn` features.

use crate::db;
use crate::driver::AuthnDriver;
use crate::model::{Password, User};
use alunos_core::db::{Db, Executor};
use alunos_core::model::EmailAddress;
use std::sync::Arc;

/// Creates a user with `password` by directly modifying the backing database.
///
/// The password is not subject to the complexity checks of the registration flow.
pub async fn create_test_user(ex: &mut Executor, email: EmailAddress, password: Password) -> User {
    let password = password.validate_and_hash(|_| None).unwrap();
    db::create_user(ex, email, password).await.unwrap()
}

/// State of a running test.
pub struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver to handle authentication flows.
    driver: AuthnDriver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database.
    pub async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(alunos_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = AuthnDriver::new(db.clone());
        TestContext { db, driver }
    }

    /// Syntactic sugar to create a user for testing purposes.
    pub async fn create_user(&self, email: &'static str, password: &'static str) -> User {
        create_test_user(&mut self.ex().await, EmailAddress::from(email), Password::from(password))
            .await
    }

    /// Gets a direct executor against the database.
    pub async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub fn driver(&self) -> AuthnDriver {
        self.driver.clone()
    }
}
