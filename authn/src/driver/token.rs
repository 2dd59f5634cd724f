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

//! Issuance of signed bearer tokens.

use crate::model::UserToken;
use alunos_core::driver::{DriverError, DriverResult};
use alunos_core::env::{get_optional_var, get_required_var};
use alunos_core::model::EmailAddress;
use derivative::Derivative;
use jsonwebtoken::{EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use uuid::Uuid;

/// Default lifetime of issued tokens.
const DEFAULT_EXPIRATION: Duration = Duration::from_secs(20 * 60);

/// Longest lifetime accepted for issued tokens.
const MAX_EXPIRATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Configuration options for token issuance.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct JwtOptions {
    /// Secret to sign tokens with.
    #[derivative(Debug = "ignore")]
    pub key: String,

    /// Value of the `iss` claim.
    pub issuer: String,

    /// Value of the `aud` claim.
    pub audience: String,

    /// Amount of time issued tokens remain valid for.
    pub expiration: Duration,
}

impl JwtOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_KEY`, `<prefix>_ISSUER`, `<prefix>_AUDIENCE`
    /// and `<prefix>_EXPIRATION`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let key = get_required_var::<String>(prefix, "KEY")?;
        if key.is_empty() {
            return Err(format!("Environment variable {}_KEY cannot be empty", prefix));
        }
        let expiration =
            get_optional_var::<Duration>(prefix, "EXPIRATION")?.unwrap_or(DEFAULT_EXPIRATION);
        if expiration > MAX_EXPIRATION {
            return Err(format!(
                "Environment variable {}_EXPIRATION cannot exceed {} days",
                prefix,
                MAX_EXPIRATION.as_secs() / (24 * 60 * 60)
            ));
        }
        Ok(Self {
            key,
            issuer: get_required_var::<String>(prefix, "ISSUER")?,
            audience: get_required_var::<String>(prefix, "AUDIENCE")?,
            expiration,
        })
    }
}

/// Claims carried by the tokens we issue.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct Claims {
    /// Email of the user the token was issued to.
    pub(crate) sub: String,

    /// Issuer of the token.
    pub(crate) iss: String,

    /// Intended audience of the token.
    pub(crate) aud: String,

    /// Issue time as seconds since the Unix epoch.
    pub(crate) iat: i64,

    /// Expiration time as seconds since the Unix epoch.
    pub(crate) exp: i64,

    /// Unique identifier of the token.
    pub(crate) jti: String,
}

/// Mints tokens signed with HMAC-SHA256 for authenticated users.
pub struct TokenIssuer {
    /// Key derived from the configured secret.
    key: EncodingKey,

    /// Value of the `iss` claim.
    issuer: String,

    /// Value of the `aud` claim.
    audience: String,

    /// Amount of time issued tokens remain valid for.
    expiration: Duration,
}

impl TokenIssuer {
    /// Creates a new issuer from its configuration.
    pub fn new(opts: JwtOptions) -> Self {
        Self {
            key: EncodingKey::from_secret(opts.key.as_bytes()),
            issuer: opts.issuer,
            audience: opts.audience,
            expiration: opts.expiration,
        }
    }

    /// Creates a token for `subject` that is valid from `now` until the configured expiration.
    pub fn issue(&self, subject: &EmailAddress, now: OffsetDateTime) -> DriverResult<UserToken> {
        let expiration = time::Duration::try_from(self.expiration)
            .ok()
            .and_then(|delta| now.checked_add(delta))
            .ok_or_else(|| {
                DriverError::BackendError(format!(
                    "Token expiration out of range: {}s after {}",
                    self.expiration.as_secs(),
                    now
                ))
            })?;
        let claims = Claims {
            sub: subject.as_str().to_owned(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.unix_timestamp(),
            exp: expiration.unix_timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.key)
            .map_err(|e| DriverError::BackendError(format!("Token creation failed: {}", e)))?;
        Ok(UserToken { token, expiration })
    }
}
