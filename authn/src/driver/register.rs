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

//! Extends the driver with the `register` method.

use crate::db;
use crate::driver::AuthnDriver;
use crate::model::{Password, User};
use alunos_core::db::DbError;
use alunos_core::driver::{DriverError, DriverResult};
use alunos_core::model::EmailAddress;
use log::info;

/// Minimum number of characters in a password.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Verifies that a password is sufficiently complex.
///
/// Passwords must have a minimum length and contain at least one character of each class: digit,
/// lowercase letter, uppercase letter and non-alphanumeric symbol.
fn password_validator(s: &str) -> Option<&'static str> {
    if s.chars().count() < MIN_PASSWORD_LENGTH {
        return Some("Too short");
    }

    let mut digit = false;
    let mut lower = false;
    let mut upper = false;
    let mut symbol = false;
    for ch in s.chars() {
        if ch.is_ascii_digit() {
            digit = true;
        } else if ch.is_lowercase() {
            lower = true;
        } else if ch.is_uppercase() {
            upper = true;
        } else if !ch.is_alphanumeric() {
            symbol = true;
        }
    }
    if !digit {
        return Some("Must contain a digit");
    }
    if !lower {
        return Some("Must contain a lowercase letter");
    }
    if !upper {
        return Some("Must contain an uppercase letter");
    }
    if !symbol {
        return Some("Must contain a non-alphanumeric character");
    }

    None
}

impl AuthnDriver {
    /// Creates a new account for a user.
    pub(crate) async fn register(
        &self,
        email: EmailAddress,
        password: Password,
    ) -> DriverResult<User> {
        let password = password.validate_and_hash(password_validator)?;

        let mut tx = self.db.begin().await?;
        let user = match db::create_user(tx.ex(), email, password).await {
            Ok(user) => user,
            Err(DbError::AlreadyExists) => {
                return Err(DriverError::AlreadyExists(
                    "Email address is already registered".to_owned(),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        tx.commit().await?;

        info!("Registered new user {}", user.email().as_str());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;

    #[test]
    fn test_password_validator_ok() {
        assert_eq!(None, password_validator("Abc12!"));
        assert_eq!(None, password_validator("Sufficiently-complex-0"));
        assert_eq!(None, password_validator("Çãoéõ9 X"));
    }

    #[test]
    fn test_password_validator_errors() {
        assert_eq!(Some("Too short"), password_validator("Ab1!"));
        assert_eq!(Some("Must contain a digit"), password_validator("Abcdef!"));
        assert_eq!(Some("Must contain a lowercase letter"), password_validator("ABCDE1!"));
        assert_eq!(Some("Must contain an uppercase letter"), password_validator("abcde1!"));
        assert_eq!(
            Some("Must contain a non-alphanumeric character"),
            password_validator("Abcde12")
        );
    }

    #[tokio::test]
    async fn test_register_ok() {
        let context = TestContext::setup().await;

        let user = context
            .driver()
            .register(EmailAddress::from("new@example.com"), Password::from("Passw0rd!"))
            .await
            .unwrap();
        assert_eq!(&EmailAddress::from("new@example.com"), user.email());

        let stored =
            db::get_user_by_email(&mut context.ex().await, &EmailAddress::from("new@example.com"))
                .await
                .unwrap();
        assert_eq!(user, stored);
        assert!(Password::from("Passw0rd!").verify(stored.password()).unwrap());
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let context = TestContext::setup().await;

        match context
            .driver()
            .register(EmailAddress::from("new@example.com"), Password::from("password"))
            .await
        {
            Err(DriverError::InvalidInput(msg)) => assert!(msg.contains("Weak password")),
            e => panic!("{:?}", e),
        }

        assert_eq!(
            DbError::NotFound,
            db::get_user_by_email(&mut context.ex().await, &EmailAddress::from("new@example.com"))
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_register_already_exists() {
        let context = TestContext::setup().await;
        context.create_user("new@example.com", "Passw0rd!").await;

        match context
            .driver()
            .register(EmailAddress::from("new@example.com"), Password::from("0therPassword!"))
            .await
        {
            Err(DriverError::AlreadyExists(msg)) => assert!(msg.contains("already registered")),
            e => panic!("{:?}", e),
        }

        assert!(
            context
                .driver()
                .login(EmailAddress::from("new@example.com"), Password::from("Passw0rd!"))
                .await
                .unwrap()
        );
    }
}
