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

use std::fmt::{self, Debug};

use async_trait::async_trait;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use log::debug;
use serde::Deserialize;

use reqdocs_core::utils::Redact;
use reqdocs_core::{Context, OAuth2Send, Result};

use super::{bearer_header, exchange_token};
use crate::constants::{DEFAULT_TOKEN_URL, REFRESH_TOKEN_GRANT_TYPE};

/// AuthorizedUserOAuth2Send authorizes requests with a stored OAuth2 refresh token.
///
/// Every request refreshes an access token first, then sends the request through the
/// context's [`HttpSend`](reqdocs_core::HttpSend). It deserializes from an
/// `authorized_user` credential file.
#[derive(Clone, Deserialize)]
pub struct AuthorizedUserOAuth2Send {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(default = "default_token_url", alias = "token_uri")]
    token_url: String,
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

impl AuthorizedUserOAuth2Send {
    /// Create a new AuthorizedUserOAuth2Send.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            token_url: default_token_url(),
        }
    }

    /// Set the token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }
}

impl Debug for AuthorizedUserOAuth2Send {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedUserOAuth2Send")
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("refresh_token", &Redact::from(&self.refresh_token))
            .field("token_url", &self.token_url)
            .finish()
    }
}

#[async_trait]
impl OAuth2Send for AuthorizedUserOAuth2Send {
    async fn oauth2_send(
        &self,
        ctx: &Context,
        credential_type: &str,
        mut req: http::Request<Bytes>,
    ) -> Result<http::Response<Bytes>> {
        debug!("refreshing access token for {credential_type}");

        let token = exchange_token(
            ctx,
            &self.token_url,
            &[
                ("grant_type", REFRESH_TOKEN_GRANT_TYPE),
                ("refresh_token", self.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ],
        )
        .await?;

        req.headers_mut()
            .insert(AUTHORIZATION, bearer_header(&token)?);
        ctx.http_send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_authorized_user_file() {
        let content = r#"{
            "type": "authorized_user",
            "client_id": "client.apps.googleusercontent.com",
            "client_secret": "very-secret-value",
            "refresh_token": "1//refresh-token-value"
        }"#;

        let send: AuthorizedUserOAuth2Send = serde_json::from_str(content).unwrap();
        assert_eq!(send.token_url, "https://oauth2.googleapis.com/token");

        let out = format!("{send:?}");
        assert!(out.contains("client.apps.googleusercontent.com"));
        assert!(!out.contains("very-secret-value"));
        assert!(!out.contains("refresh-token-value"));
    }
}
