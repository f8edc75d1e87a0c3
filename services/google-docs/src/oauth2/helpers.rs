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

use bytes::Bytes;
use chrono::TimeDelta;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderValue, Method};
use log::{debug, error};
use serde::Deserialize;

use reqdocs_core::time::now;
use reqdocs_core::{Context, Error, Result, SigningCredential};

use crate::credential::Token;

/// Standard OAuth2 token response.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// POST a form-encoded grant to `url` and parse the token it returns.
///
/// Every non-2xx status fails and keeps the status on the error.
pub(crate) async fn exchange_token(
    ctx: &Context,
    url: &str,
    form: &[(&str, &str)],
) -> Result<Token> {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();

    let req = http::Request::builder()
        .method(Method::POST)
        .uri(url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(ACCEPT, "application/json")
        .body(Bytes::from(body))
        .map_err(|e| Error::request_invalid("failed to build token request").with_source(e))?;

    let resp = ctx.http_send(req).await?;

    if !resp.status().is_success() {
        error!("token exchange against {url} got unexpected response: {resp:?}");
        let body = String::from_utf8_lossy(resp.body());
        return Err(
            Error::credential_invalid(format!("exchange token failed: {body}"))
                .with_status(resp.status()),
        );
    }

    let token_resp: TokenResponse = serde_json::from_slice(resp.body())
        .map_err(|e| Error::unexpected("failed to parse token response").with_source(e))?;

    let token = Token {
        access_token: token_resp.access_token,
        expires_at: token_resp
            .expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(TimeDelta::try_seconds)
            .map(|ttl| now() + ttl),
    };
    if !token.is_valid() {
        return Err(Error::credential_invalid(
            "token endpoint returned an empty access token",
        ));
    }

    debug!("exchanged token from {url}, expires at {:?}", token.expires_at);
    Ok(token)
}

/// Build a sensitive `Authorization: Bearer` header value.
pub(crate) fn bearer_header(token: &Token) -> Result<HeaderValue> {
    let mut value = HeaderValue::try_from(format!("Bearer {}", token.access_token))?;
    value.set_sensitive(true);
    Ok(value)
}
