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

//! The `User` data type.

use crate::model::HashedPassword;
use alunos_core::model::EmailAddress;

/// Representation of an account in the identity store.
#[derive(Debug, PartialEq)]
pub struct User {
    /// Email address that identifies the user and that they log in with.
    email: EmailAddress,

    /// Hashed password.
    password: HashedPassword,
}

impl User {
    /// Creates a new user with the given fields.
    pub(crate) fn new(email: EmailAddress, password: HashedPassword) -> Self {
        Self { email, password }
    }

    /// Gets the user's email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Gets the user's password as a hash.
    pub fn password(&self) -> &HashedPassword {
        &self.password
    }
}
