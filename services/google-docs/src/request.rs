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

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use log::{debug, error};
use serde_json::Value;

use reqdocs_core::{Context, Error, ErrorKind, ProvideCredential, Result};

use crate::authenticate::Authenticator;
use crate::config::{AuthenticationMethod, Config};
use crate::constants::{DEFAULT_NODE_NAME, OAUTH2_CREDENTIAL_TYPE};
use crate::credential::ServiceAccount;
use crate::oauth2::bearer_header;
use crate::utils::has_keys;

/// Node is the workflow step a request is made on behalf of.
///
/// Errors returned by [`ApiClient`] are attributed to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Display name of the node.
    pub name: String,
}

impl Node {
    /// Create a node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_NAME)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// RequestOptions describes one call against the API.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    method: Method,
    endpoint: String,
    uri: Option<String>,
    body: Option<Value>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
}

impl RequestOptions {
    /// Create options for `method` against `endpoint`, relative to the api base.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            uri: None,
            body: None,
            query: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Create GET options.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// Create POST options.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// Send to this absolute uri instead of the api base and endpoint.
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the JSON body.
    ///
    /// `null` and an object without keys leave the request without a body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = if body.is_null() || (body.is_object() && !has_keys(&body)) {
            None
        } else {
            Some(body)
        };
        self
    }

    /// Set a query parameter, replacing an existing value for the same key.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let (key, value) = (key.into(), value.into());
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Set every pair of `query`, see [`RequestOptions::with_query`].
    pub fn with_queries<I, K, V>(self, query: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        query
            .into_iter()
            .fold(self, |opts, (k, v)| opts.with_query(k, v))
    }

    /// Set an extra header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The JSON body, `None` when the request is sent without one.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The value of query parameter `key`.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The full uri this request is sent to.
    pub fn uri(&self, api_base: &str) -> String {
        let mut uri = match &self.uri {
            Some(uri) => uri.clone(),
            None => format!("{api_base}{}", self.endpoint),
        };

        if !self.query.is_empty() {
            uri.push(if uri.contains('?') { '&' } else { '?' });
            uri.push_str(
                &form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(&self.query)
                    .finish(),
            );
        }

        uri
    }

    pub(crate) fn build(&self, api_base: &str) -> Result<http::Request<Bytes>> {
        let body = match &self.body {
            Some(body) => Bytes::from(serde_json::to_vec(body).map_err(|e| {
                Error::request_invalid("failed to serialize request body").with_source(e)
            })?),
            None => Bytes::new(),
        };

        let mut req = http::Request::builder()
            .method(self.method.clone())
            .uri(self.uri(api_base))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)?;

        for (name, value) in &self.headers {
            req.headers_mut().insert(name, value.clone());
        }

        Ok(req)
    }
}

/// ApiClient sends authorized JSON requests to the Google Docs API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    ctx: Context,
    config: Config,
    node: Node,
    authenticator: Authenticator,
    credential: Arc<dyn ProvideCredential<Credential = ServiceAccount>>,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// `credential` is only consulted for [`AuthenticationMethod::ServiceAccount`].
    pub fn new(
        ctx: Context,
        config: Config,
        credential: impl ProvideCredential<Credential = ServiceAccount>,
    ) -> Self {
        Self {
            ctx,
            authenticator: Authenticator::from_config(&config),
            config,
            node: Node::default(),
            credential: Arc::new(credential),
        }
    }

    /// Attribute errors to `node`.
    pub fn with_node(mut self, node: Node) -> Self {
        self.node = node;
        self
    }

    /// The config of this client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The node errors are attributed to.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Send one request and parse the JSON response.
    ///
    /// An empty response body yields [`Value::Null`].
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Operation`] when no service account credential can be resolved.
    /// - [`ErrorKind::Api`] for every other failure, with the original error as source.
    pub async fn request(&self, opts: &RequestOptions) -> Result<Value> {
        self.send(opts).await.map_err(|err| match err.kind() {
            ErrorKind::Operation => err,
            _ => Error::api(&self.node.name, err),
        })
    }

    async fn send(&self, opts: &RequestOptions) -> Result<Value> {
        let mut req = opts.build(&self.config.api_base)?;
        debug!(
            "sending {} {} with {}",
            req.method(),
            req.uri(),
            self.config.authentication
        );

        let resp = match self.config.authentication {
            AuthenticationMethod::ServiceAccount => {
                let sa = self.resolve_credential().await?;
                let token = self.authenticator.access_token(&self.ctx, &sa).await?;
                req.headers_mut()
                    .insert(AUTHORIZATION, bearer_header(&token)?);
                self.ctx.http_send(req).await?
            }
            AuthenticationMethod::OAuth2 => {
                self.ctx.oauth2_send(OAUTH2_CREDENTIAL_TYPE, req).await?
            }
        };

        parse_response(resp)
    }

    async fn resolve_credential(&self) -> Result<ServiceAccount> {
        match self.credential.provide_credential(&self.ctx).await {
            Ok(Some(sa)) => Ok(sa),
            Ok(None) => Err(Error::operation(
                &self.node.name,
                "No credentials got returned!",
            )),
            Err(err) => Err(Error::operation(
                &self.node.name,
                format!("failed to resolve credentials: {}", err.message()),
            )
            .with_source(err)),
        }
    }
}

fn parse_response(resp: http::Response<Bytes>) -> Result<Value> {
    let status = resp.status();
    let body = resp.into_body();

    if !status.is_success() {
        error!("request got unexpected response {status}");
        return Err(
            Error::unexpected(api_error_message(status, &body)).with_status(status),
        );
    }

    if body.is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&body)
        .map_err(|e| Error::unexpected("failed to parse response body").with_source(e))
}

/// Extract a readable message from an error response.
///
/// Google APIs answer with `{"error": {"message": ...}}`, other bodies are kept as text.
fn api_error_message(status: StatusCode, body: &[u8]) -> String {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| match &v["error"] {
            Value::Object(err) => err.get("message").and_then(Value::as_str).map(str::to_string),
            Value::String(err) => Some(err.clone()),
            _ => None,
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        message
    }
}
