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

//! The `UserToken` data type.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// A signed bearer token handed out on successful login.
#[derive(Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct UserToken {
    /// The encoded and signed token.
    pub token: String,

    /// Moment after which the token is no longer valid.
    #[serde(with = "time::serde::rfc3339")]
    pub expiration: OffsetDateTime,
}
