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

//! Test utilities for the REST layer.

use crate::db;
use crate::driver::testutils::create_test_user;
use crate::driver::{AuthnDriver, JwtOptions, TokenIssuer};
use crate::model::User;
use crate::rest::app;
use alunos_core::clocks::testutils::SettableClock;
use alunos_core::db::{Db, DbError};
use alunos_core::model::EmailAddress;
use axum::Router;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use time::macros::datetime;

/// Secret used to sign tokens in tests.
const TEST_KEY: &str = "the-test-key";

/// Subset of the token claims that tests care about.
#[derive(Deserialize)]
struct SubjectClaim {
    /// Email of the user the token was issued to.
    sub: String,
}

/// State of a running test.
pub(crate) struct TestContext {
    /// The app router serving the account endpoints under `/api/Account`.
    app: Router,

    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used to stamp new tokens.
    clock: Arc<SettableClock>,
}

impl TestContext {
    /// Initializes the app using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(alunos_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(datetime!(2023-12-01 10:00:00 UTC)));

        let issuer = TokenIssuer::new(JwtOptions {
            key: TEST_KEY.to_owned(),
            issuer: "test-issuer".to_owned(),
            audience: "test-audience".to_owned(),
            expiration: Duration::from_secs(20 * 60),
        });
        let driver = AuthnDriver::new(db.clone());
        let app = Router::new()
            .nest("/api/Account", app(Arc::new(driver), Arc::new(issuer), clock.clone()));

        TestContext { app, db, clock }
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Gets the clock used by the app.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Creates a user by directly modifying the backing database.
    pub(crate) async fn create_user(&self, email: &'static str, password: &'static str) -> User {
        create_test_user(&mut self.db.ex().await.unwrap(), email.into(), password.into()).await
    }

    /// Checks if the user with `email` exists by directly querying the backing database.
    pub(crate) async fn user_exists(&self, email: &'static str) -> bool {
        let email = EmailAddress::from(email);
        match db::get_user_by_email(&mut self.db.ex().await.unwrap(), &email).await {
            Ok(_) => true,
            Err(DbError::NotFound) => false,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Verifies the signature of `token` and returns its subject, or `None` if the token is not
    /// one of ours.
    pub(crate) fn token_subject(&self, token: &str) -> Option<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_issuer(&["test-issuer"]);
        validation.set_audience(&["test-audience"]);
        jsonwebtoken::decode::<SubjectClaim>(
            token,
            &DecodingKey::from_secret(TEST_KEY.as_bytes()),
            &validation,
        )
        .map(|data| data.claims.sub)
        .ok()
    }
}
