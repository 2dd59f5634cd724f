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

//! Extends the driver with the `login` method.

use crate::db;
use crate::driver::AuthnDriver;
use crate::model::Password;
use alunos_core::db::DbError;
use alunos_core::driver::DriverResult;
use alunos_core::model::EmailAddress;
use log::debug;

impl AuthnDriver {
    /// Checks the credentials of the user identified by `email`.
    pub(crate) async fn login(&self, email: EmailAddress, password: Password) -> DriverResult<bool> {
        let mut ex = self.db.ex().await?;

        let user = match db::get_user_by_email(&mut ex, &email).await {
            Ok(user) => user,
            Err(DbError::NotFound) => {
                debug!("Rejecting login for unknown user {}", email.as_str());
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        let valid = password.verify(user.password())?;
        if !valid {
            debug!("Rejecting login for {} due to a bad password", email.as_str());
        }
        Ok(valid)
    }
}
