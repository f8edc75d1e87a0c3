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

//! A recording [`HttpSend`] that answers from canned replies.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use serde_json::Value;

use reqdocs_core::{Context, Error, HttpSend, OAuth2Send, Result};

pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const API_BASE: &str = "https://docs.googleapis.com/v1";
pub const DRIVE_FILES: &str = "https://www.googleapis.com/drive/v3/files";

pub const PRIVATE_KEY: &str = include_str!("fixtures/service_account_key.pem");
pub const PUBLIC_KEY: &str = include_str!("fixtures/service_account_key.pub.pem");

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn query(&self) -> HashMap<String, String> {
        let query = self.uri.split_once('?').map(|(_, q)| q).unwrap_or_default();
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn form(&self) -> HashMap<String, String> {
        form_urlencoded::parse(&self.body).into_owned().collect()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body must be json")
    }
}

#[derive(Clone, Debug)]
enum Reply {
    Response(StatusCode, Bytes),
    Fail(String),
}

#[derive(Debug)]
struct Route {
    prefix: String,
    replies: VecDeque<Reply>,
}

#[derive(Debug, Default)]
struct State {
    routes: Vec<Route>,
    requests: Vec<RecordedRequest>,
}

/// Replies are queued per uri prefix. The last reply of a route is repeated once the
/// queue is drained.
#[derive(Clone, Debug, Default)]
pub struct MockHttpSend {
    state: Arc<Mutex<State>>,
}

impl MockHttpSend {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, prefix: &str, reply: Reply) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            match state.routes.iter_mut().find(|r| r.prefix == prefix) {
                Some(route) => route.replies.push_back(reply),
                None => state.routes.push(Route {
                    prefix: prefix.to_string(),
                    replies: VecDeque::from([reply]),
                }),
            }
        }
        self
    }

    pub fn reply(self, prefix: &str, status: StatusCode, body: &str) -> Self {
        self.push(
            prefix,
            Reply::Response(status, Bytes::copy_from_slice(body.as_bytes())),
        )
    }

    pub fn reply_json(self, prefix: &str, body: Value) -> Self {
        self.reply(prefix, StatusCode::OK, &body.to_string())
    }

    pub fn token(self, access_token: &str) -> Self {
        self.reply_json(
            TOKEN_URL,
            serde_json::json!({
                "access_token": access_token,
                "expires_in": 3599,
                "token_type": "Bearer",
            }),
        )
    }

    pub fn fail(self, prefix: &str, message: &str) -> Self {
        self.push(prefix, Reply::Fail(message.to_string()))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, prefix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.uri.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let uri = parts.uri.to_string();

        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: parts.method,
            uri: uri.clone(),
            headers: parts.headers,
            body,
        });

        let route = state
            .routes
            .iter_mut()
            .find(|r| uri.starts_with(&r.prefix))
            .unwrap_or_else(|| panic!("no reply configured for {uri}"));
        let reply = if route.replies.len() > 1 {
            route.replies.pop_front().unwrap()
        } else {
            route.replies.front().cloned().unwrap()
        };

        match reply {
            Reply::Response(status, body) => Ok(http::Response::builder()
                .status(status)
                .body(body)
                .unwrap()),
            Reply::Fail(message) => Err(Error::unexpected(message)),
        }
    }
}

/// A delegated OAuth2 helper that records the credential types it was asked for and
/// forwards to its own transport.
#[derive(Clone, Debug)]
pub struct MockOAuth2Send {
    http: MockHttpSend,
    credential_types: Arc<Mutex<Vec<String>>>,
}

impl MockOAuth2Send {
    pub fn new(http: MockHttpSend) -> Self {
        Self {
            http,
            credential_types: Arc::default(),
        }
    }

    pub fn credential_types(&self) -> Vec<String> {
        self.credential_types.lock().unwrap().clone()
    }
}

#[async_trait]
impl OAuth2Send for MockOAuth2Send {
    async fn oauth2_send(
        &self,
        _: &Context,
        credential_type: &str,
        mut req: http::Request<Bytes>,
    ) -> Result<http::Response<Bytes>> {
        self.credential_types
            .lock()
            .unwrap()
            .push(credential_type.to_string());
        req.headers_mut().insert(
            http::header::AUTHORIZATION,
            http::HeaderValue::from_static("Bearer delegated"),
        );
        self.http.http_send(req).await
    }
}
