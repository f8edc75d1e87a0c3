// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::debug;
use serde::{Deserialize, Serialize};

use reqdocs_core::time::{now, unix_timestamp, DateTime};
use reqdocs_core::{Context, Error, Result};

use crate::config::Config;
use crate::constants::{
    ASSERTION_LIFETIME_SECS, DEFAULT_SCOPES, DEFAULT_TOKEN_URL, JWT_BEARER_GRANT_TYPE,
};
use crate::credential::{ServiceAccount, Token};
use crate::oauth2::exchange_token;

/// Claims of the assertion exchanged for an access token.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct Claims {
    pub(crate) iss: String,
    pub(crate) sub: String,
    pub(crate) scope: String,
    pub(crate) aud: String,
    pub(crate) iat: u64,
    pub(crate) exp: u64,
}

impl Claims {
    fn new(sa: &ServiceAccount, scope: &str, aud: &str, issued_at: DateTime) -> Self {
        let iat = unix_timestamp(issued_at);

        Claims {
            iss: sa.email.clone(),
            sub: sa.subject().to_string(),
            scope: scope.to_string(),
            aud: aud.to_string(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }
}

/// Authenticator turns a service account into an access token.
///
/// Reference: [Using OAuth 2.0 for Server to Server Applications](https://developers.google.com/identity/protocols/oauth2/service-account#httprest)
#[derive(Clone, Debug)]
pub struct Authenticator {
    token_url: String,
    scopes: Vec<String>,
}

impl Default for Authenticator {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Authenticator {
    /// Create an authenticator for the default token endpoint and scopes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an authenticator from the token endpoint and scopes of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            token_url: config.token_url.clone(),
            scopes: config.scopes.clone(),
        }
    }

    /// Set the token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// The space separated scope claim.
    pub fn scope(&self) -> String {
        self.scopes.join(" ")
    }

    /// Sign an RS256 assertion for `sa` issued at `issued_at`.
    ///
    /// The `kid` header is set to the private key itself.
    pub fn sign_assertion(&self, sa: &ServiceAccount, issued_at: DateTime) -> Result<String> {
        let claims = Claims::new(sa, &self.scope(), &self.token_url, issued_at);

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(sa.private_key.clone());

        let key = EncodingKey::from_rsa_pem(sa.private_key.as_bytes()).map_err(|e| {
            Error::credential_invalid("failed to parse RSA private key").with_source(e)
        })?;

        jsonwebtoken::encode(&header, &claims, &key)
            .map_err(|e| Error::unexpected("failed to encode JWT").with_source(e))
    }

    /// Exchange a freshly signed assertion for an access token.
    pub async fn access_token(&self, ctx: &Context, sa: &ServiceAccount) -> Result<Token> {
        debug!(
            "exchanging assertion for {} as {} with scope: {}",
            sa.email,
            sa.subject(),
            self.scope()
        );

        let assertion = self.sign_assertion(sa, now())?;

        exchange_token(
            ctx,
            &self.token_url,
            &[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ],
        )
        .await
    }
}
